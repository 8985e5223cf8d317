const MINSECS: u64 = 60;
const HOURSECS: u64 = 60 * MINSECS;
const DAYSECS: u64 = 24 * HOURSECS;
const WEEKSECS: u64 = 7 * DAYSECS;

/// Formats a seconds count for display on the certificate.
///
/// `short` picks the single coarsest unit that divides the count exactly
/// ("2 hours"); the long form spells out days, hours, minutes and seconds,
/// omitting zero components ("1 day 4 hours 30 minutes").
pub fn format_duration(seconds: u64, short: bool) -> String {
    if short {
        short_form(seconds)
    } else {
        long_form(seconds)
    }
}

fn unit(value: u64, singular: &str) -> String {
    if value == 1 {
        format!("{value} {singular}")
    } else {
        format!("{value} {singular}s")
    }
}

/// Promotes to a coarser unit only while the span divides with zero
/// remainder, so 90 seconds stays "90 seconds" rather than rounding.
fn short_form(seconds: u64) -> String {
    let mut out = unit(seconds, "second");
    if seconds % MINSECS == 0 {
        out = unit(seconds / MINSECS, "minute");
        if seconds % HOURSECS == 0 {
            out = unit(seconds / HOURSECS, "hour");
            if seconds % DAYSECS == 0 {
                out = unit(seconds / DAYSECS, "day");
                if seconds % WEEKSECS == 0 {
                    out = unit(seconds / WEEKSECS, "week");
                }
            }
        }
    }
    out
}

fn long_form(seconds: u64) -> String {
    let days = seconds / DAYSECS;
    let hours = (seconds / HOURSECS) % 24;
    let minutes = (seconds / MINSECS) % 60;
    let secs = seconds % MINSECS;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }
    if secs > 0 {
        parts.push(unit(secs, "second"));
    }
    parts.join(" ")
}
