use crate::reminder::RepeatPolicy;
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches "at 5", "at 5pm", "at 5:30 p.m." and so on. The "at" token
    /// is deliberately not anchored to a word boundary, matching the
    /// behavior voice clients already rely on.
    static ref TIME_PHRASE: Regex =
        Regex::new(r"at\s+(\d{1,2})(:(\d{2}))?\s*(a\.?m\.?|p\.?m\.?)?").unwrap();
    static ref REPEAT_KEYWORDS: Regex = Regex::new(
        "(every day|daily|every week|weekly|everyday|everyweek|until i stop|forever|indefinitely|always)"
    )
    .unwrap();
    static ref REMIND_ME_TO_PREFIX: Regex = Regex::new(r"^remind me to\s*").unwrap();
    static ref REMIND_ME_PREFIX: Regex = Regex::new(r"^remind me\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Result of parsing one spoken phrase
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCommand {
    pub title: String,
    pub trigger_time: NaiveDateTime,
    pub repeat: RepeatPolicy,
    pub has_explicit_time: bool,
}

/// Parses a free-form phrase like "remind me to take pills at 9pm every
/// day" into a title, an absolute trigger time and a repetition class.
///
/// Pure and deterministic: the same transcript and clock always produce the
/// same command. When no time phrase is detected the trigger time is `now`
/// and the whole phrase becomes the title. An empty title is a valid
/// output; callers must treat it as "no title heard".
pub fn parse_voice_command(transcript: &str, now: NaiveDateTime) -> VoiceCommand {
    let lower = transcript.to_lowercase();

    let repeat = detect_repeat(&lower);

    match detect_time(&lower, now) {
        Some((time_phrase, time)) => VoiceCommand {
            title: clean_title(&lower, &time_phrase),
            trigger_time: roll_forward(now, time),
            repeat,
            has_explicit_time: true,
        },
        None => VoiceCommand {
            title: capitalize(lower.trim()),
            trigger_time: now,
            repeat,
            has_explicit_time: false,
        },
    }
}

/// First matching category wins: daily, then weekly, then indefinite.
/// Detection is independent of whether a time phrase was found.
fn detect_repeat(lower: &str) -> RepeatPolicy {
    const DAILY: &[&str] = &["every day", "daily", "everyday"];
    const WEEKLY: &[&str] = &["every week", "weekly", "everyweek"];
    const INDEFINITE: &[&str] = &["until i stop", "forever", "indefinitely", "always"];

    if DAILY.iter().any(|kw| lower.contains(kw)) {
        RepeatPolicy::Daily
    } else if WEEKLY.iter().any(|kw| lower.contains(kw)) {
        RepeatPolicy::Weekly
    } else if INDEFINITE.iter().any(|kw| lower.contains(kw)) {
        RepeatPolicy::Indefinite
    } else {
        RepeatPolicy::Once
    }
}

/// Finds an explicit time phrase and converts it to a 24h wall-clock time.
/// Returns the exact matched substring so the title cleanup can remove it.
fn detect_time(lower: &str, now: NaiveDateTime) -> Option<(String, NaiveTime)> {
    let caps = TIME_PHRASE.captures(lower)?;
    let phrase = caps.get(0).unwrap().as_str().to_string();
    let hour: u32 = caps.get(1).unwrap().as_str().parse().ok()?;
    let minute: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let meridiem = caps.get(4).map(|m| m.as_str().replace('.', ""));

    let hour = match meridiem.as_deref() {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        Some(_) => hour,
        // No meridiem spoken: guess the nearer evening occurrence when the
        // plain reading would already have passed this morning. Known
        // heuristic, kept exactly for behavioral compatibility.
        None if hour < 12 && hour <= now.hour() => hour + 12,
        None if hour > 12 => return None,
        None => hour,
    };

    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some((phrase, time))
}

/// Today at the stated time, or tomorrow when that already passed. The
/// rollover is applied at most once.
fn roll_forward(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let candidate = now.date().and_time(time);
    if candidate < now {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

/// Strips the matched time phrase, every repetition keyword and a leading
/// "remind me (to)" prefix, then normalizes whitespace.
fn clean_title(lower: &str, time_phrase: &str) -> String {
    let without_time = lower.replacen(time_phrase, "", 1);
    let without_repeat = REPEAT_KEYWORDS.replace_all(&without_time, "");
    let without_prefix = REMIND_ME_TO_PREFIX.replace(&without_repeat, "");
    let without_prefix = REMIND_ME_PREFIX.replace(&without_prefix, "");
    let collapsed = WHITESPACE.replace_all(&without_prefix, " ");
    capitalize(collapsed.trim())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn clock(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 12)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn phrase_without_time_keeps_now_as_trigger() {
        let now = clock(10, 15);
        let cmd = parse_voice_command("remind me to stretch", now);

        assert!(!cmd.has_explicit_time);
        assert_eq!(cmd.trigger_time, now);
        assert_eq!(cmd.repeat, RepeatPolicy::Once);
        assert_eq!(cmd.title, "Remind me to stretch");
    }

    #[test]
    fn parses_pm_time() {
        let cmd = parse_voice_command("call mom at 5pm", clock(10, 0));

        assert!(cmd.has_explicit_time);
        assert_eq!(cmd.trigger_time, clock(17, 0));
        assert_eq!(cmd.title, "Call mom");
    }

    #[test]
    fn parses_am_time_with_minutes() {
        let cmd = parse_voice_command("wake me at 5:30am", clock(1, 0));

        assert_eq!(cmd.trigger_time, clock(5, 30));
    }

    #[test]
    fn parses_dotted_meridiem() {
        let cmd = parse_voice_command("call mom at 5 p.m.", clock(10, 0));

        assert_eq!(cmd.trigger_time, clock(17, 0));
        assert_eq!(cmd.title, "Call mom");
    }

    #[test]
    fn guesses_pm_when_plain_hour_already_passed() {
        // "at 9" spoken at 10:00 means 9pm, not the 9am that already passed
        let cmd = parse_voice_command("remind me to call mom at 9", clock(10, 0));

        assert_eq!(cmd.trigger_time, clock(21, 0));
        assert_eq!(cmd.repeat, RepeatPolicy::Once);
        assert_eq!(cmd.title, "Call mom");
    }

    #[test]
    fn keeps_plain_hour_when_still_ahead() {
        let cmd = parse_voice_command("call mom at 9", clock(8, 0));

        assert_eq!(cmd.trigger_time, clock(9, 0));
    }

    #[test]
    fn noon_is_not_pm_guessed() {
        // hour 12 never gets 12 added; noon already passed, so tomorrow
        let cmd = parse_voice_command("lunch at 12", clock(14, 0));

        assert_eq!(cmd.trigger_time, clock(12, 0) + Duration::days(1));
    }

    #[test]
    fn midnight_is_twelve_am() {
        let cmd = parse_voice_command("backup at 12am", clock(14, 0));

        assert_eq!(cmd.trigger_time, clock(0, 0) + Duration::days(1));
    }

    #[test]
    fn noon_stays_twelve_pm() {
        let cmd = parse_voice_command("lunch at 12pm", clock(9, 0));

        assert_eq!(cmd.trigger_time, clock(12, 0));
    }

    #[test]
    fn passed_time_rolls_over_to_tomorrow_once() {
        let cmd = parse_voice_command("drink water at 3pm", clock(16, 0));

        assert_eq!(cmd.trigger_time, clock(15, 0) + Duration::days(1));
    }

    #[test]
    fn detects_daily_repetition() {
        let cmd = parse_voice_command("take pills every day at 8am", clock(7, 0));

        assert_eq!(cmd.repeat, RepeatPolicy::Daily);
        assert_eq!(cmd.trigger_time, clock(8, 0));
        assert_eq!(cmd.title, "Take pills");
    }

    #[test]
    fn detects_weekly_and_indefinite_repetition() {
        let now = clock(7, 0);
        assert_eq!(
            parse_voice_command("water plants weekly at 9am", now).repeat,
            RepeatPolicy::Weekly
        );
        assert_eq!(
            parse_voice_command("stand up forever at 9am", now).repeat,
            RepeatPolicy::Indefinite
        );
    }

    #[test]
    fn first_repetition_category_wins() {
        let cmd = parse_voice_command("log weight every day and every week at 7am", clock(6, 0));

        assert_eq!(cmd.repeat, RepeatPolicy::Daily);
    }

    #[test]
    fn repetition_applies_even_without_time() {
        let cmd = parse_voice_command("drink water every day", clock(10, 0));

        assert!(!cmd.has_explicit_time);
        assert_eq!(cmd.repeat, RepeatPolicy::Daily);
        // keywords are only stripped when a time phrase was found
        assert_eq!(cmd.title, "Drink water every day");
    }

    #[test]
    fn plain_hour_above_twelve_is_not_a_time() {
        let now = clock(10, 0);
        let cmd = parse_voice_command("meet me at 15", now);

        assert!(!cmd.has_explicit_time);
        assert_eq!(cmd.trigger_time, now);
        assert_eq!(cmd.title, "Meet me at 15");
    }

    #[test]
    fn minutes_default_to_zero() {
        let cmd = parse_voice_command("standup at 9am", clock(7, 0));

        assert_eq!(cmd.trigger_time, clock(9, 0));
    }

    #[test]
    fn invalid_minutes_are_not_a_time() {
        let cmd = parse_voice_command("ping me at 9:75am", clock(7, 0));

        assert!(!cmd.has_explicit_time);
    }

    #[test]
    fn empty_title_is_a_valid_output() {
        let cmd = parse_voice_command("remind me to at 8pm", clock(10, 0));

        assert!(cmd.has_explicit_time);
        assert_eq!(cmd.title, "");
    }

    #[test]
    fn title_is_cleaned_and_capitalized() {
        let cmd = parse_voice_command("REMIND ME TO   feed the cat at 6pm every day", clock(10, 0));

        assert_eq!(cmd.title, "Feed the cat");
        assert_eq!(cmd.repeat, RepeatPolicy::Daily);
    }
}
