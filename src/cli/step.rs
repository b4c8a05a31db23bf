//! Per-step output: the step-list summary and the full step breakdown

use std::io::{self, Write};

use colored::Colorize;

use super::checks::render_checks;
use super::exchange::render_request_response;
use super::highlight::{highlight, Language};
use super::{pretty_json, seconds, RenderOptions};
use crate::results::Step;

/// Print one status line per step, in order.
pub fn render_step_summary<W: Write>(out: &mut W, steps: &[Step]) -> io::Result<()> {
    writeln!(out, "\n{}\n", "Summary".bold())?;
    for step in steps {
        let (glyph, verb) = if step.passed {
            ("✔ ".green(), "passed")
        } else if step.skipped {
            ("⚠︎ ".yellow(), "skipped")
        } else {
            ("✕ ".red(), "failed")
        };
        writeln!(
            out,
            "  {glyph}{} {verb} after {}s",
            step.display_name().bold(),
            seconds(step.duration)
        )?;
    }
    Ok(())
}

/// Print the full breakdown of a step.
///
/// Errored and skipped steps show only their message. Passing steps show
/// a single line unless verbose output is on.
pub fn render_step<W: Write>(out: &mut W, step: &Step, options: RenderOptions) -> io::Result<()> {
    let title = format!("{} › {}", step.test_id, step.display_name());

    if step.errored || step.skipped {
        writeln!(out, "{}", format!("\n⚠︎ {title}").bright_yellow())?;
        writeln!(out, "\n{}\n", step.error_message.as_deref().unwrap_or_default())?;
        return Ok(());
    }

    if step.passed {
        writeln!(out, "{}", format!("\n✔ {title}").bright_green())?;
        if !options.verbose {
            return Ok(());
        }
    } else {
        writeln!(out, "{}", format!("\n● {title}").bright_red())?;
    }

    render_request_response(out, step.kind, step.request.as_ref(), step.response.as_ref())?;

    if let Some(captures) = &step.captures {
        writeln!(out, "{}", "\nCaptures\n".bold())?;
        writeln!(out, "{}", highlight(&pretty_json(captures), Language::Json))?;
    }
    if let Some(cookies) = &step.cookies {
        writeln!(out, "{}", "\nCookies\n".bold())?;
        writeln!(out, "{}", highlight(&pretty_json(cookies), Language::Json))?;
    }
    if let Some(checks) = &step.checks {
        render_checks(out, checks, options)?;
    }
    Ok(())
}
