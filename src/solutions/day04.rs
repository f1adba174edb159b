use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};
use std::num::ParseIntError;

use aoc_framework::parsing::{ParseContextError, parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;

#[solution_runner(
    name = "Day 4: Repose Record",
    parsed = GuardSchedules,
    part_one = Day04,
    part_two = Day04
)]
impl super::AdventOfCode2018<4> {}

/*
Input is a log of observations of the guard post, one per line and in no particular order. Each
line has a bracketed timestamp and a message:

    [1518-11-01 00:00] Guard #10 begins shift
    [1518-11-01 00:05] falls asleep
    [1518-11-01 00:25] wakes up

Sleep and wake messages have no guard ID; they belong to whichever guard's shift most recently
started. Guards only sleep during the midnight hour (00:00 - 00:59).
*/

/// The integer type for guard IDs.
///
/// Observed 4 digit IDs from input.
type GuardId = u32;

/// A minute of the midnight hour, `0..60`.
type Minute = u8;

/// Amount of minutes tracked per day, the midnight hour.
const MINUTES: usize = 60;

/// Counts of asleep minutes. Bounded by days observed times minutes per day.
type SleepCount = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    ShiftStart(GuardId),
    FallAsleep,
    WakeUp,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftStart(id) => write!(f, "Guard #{id} begins shift"),
            Self::FallAsleep => write!(f, "falls asleep"),
            Self::WakeUp => write!(f, "wakes up"),
        }
    }
}

/// An observation from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Event {
    timestamp: NaiveDateTime,
    kind: EventKind,
}

impl Event {
    fn day_key(&self) -> DayKey {
        DayKey {
            month: self.timestamp.month(),
            day: self.timestamp.day(),
        }
    }

    fn minute(&self) -> Minute {
        Minute::try_from(self.timestamp.minute()).expect("minute of hour should fit within u8")
    }
}

#[derive(thiserror::Error, Debug)]
enum ParseLogEntryError {
    #[error("expected pattern \"[YYYY-MM-DD HH:MM] message\", found {0:?}")]
    NotLogEntry(String),

    #[error("invalid timestamp: {timestamp:?}")]
    InvalidTimestamp {
        timestamp: String,
        source: chrono::ParseError,
    },

    /// The message is not a shift start, sleep, or wake announcement.
    #[error("unrecognized message: {0:?}")]
    UnrecognizedMessage(String),

    #[error("invalid guard ID")]
    InvalidGuardId(#[from] ParseContextError<ParseIntError>),
}

struct EventParser {
    /// Regex capturing the timestamp & message of a line.
    entry_re: Regex,
    /// Regex capturing the guard ID of a shift start message.
    shift_start_re: Regex,
}

impl EventParser {
    const ENTRY_PATTERN: &str = r"^\[([^\]]*)\] (.+)$";
    const SHIFT_START_PATTERN: &str = r"^Guard #(\d+) begins shift$";
    const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

    fn new() -> Self {
        let entry_re = Regex::new(Self::ENTRY_PATTERN).expect("pattern should be valid");
        let shift_start_re =
            Regex::new(Self::SHIFT_START_PATTERN).expect("pattern should be valid");
        Self {
            entry_re,
            shift_start_re,
        }
    }

    fn parse(&self, line: &str) -> Result<Event, ParseLogEntryError> {
        let (_, [timestamp_str, message]) = self
            .entry_re
            .captures(line.trim())
            .map(|captures| captures.extract())
            .ok_or_else(|| ParseLogEntryError::NotLogEntry(line.to_owned()))?;

        let timestamp = NaiveDateTime::parse_from_str(timestamp_str, Self::TIMESTAMP_FORMAT)
            .map_err(|source| ParseLogEntryError::InvalidTimestamp {
                timestamp: timestamp_str.to_owned(),
                source,
            })?;

        let kind = match message {
            "falls asleep" => EventKind::FallAsleep,
            "wakes up" => EventKind::WakeUp,
            other => {
                let (_, [id_str]) = self
                    .shift_start_re
                    .captures(other)
                    .map(|captures| captures.extract())
                    .ok_or_else(|| ParseLogEntryError::UnrecognizedMessage(other.to_owned()))?;
                EventKind::ShiftStart(parse_with_context(id_str)?)
            }
        };

        Ok(Event { timestamp, kind })
    }
}

/// Order events by timestamp, keeping input order for equal timestamps.
fn sequence_events(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|event| event.timestamp);
    events
}

/*
Replaying the log in chronological order reconstructs when each guard slept.

A guard is on duty from the start of their shift and may fall asleep then wake up any number of
times. Only one sleep can be open at a time, so the start minute of that sleep is held in the
guard's state until they wake.

Guards count as asleep on the minute they fall asleep, and awake on the minute they wake up.
*/

/// The calendar month & day a guard's minutes are recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct DayKey {
    month: u32,
    day: u32,
}

impl Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Asleep flags for each minute of a day's midnight hour.
type DayRecord = [bool; MINUTES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DutyState {
    OnDuty,
    Asleep { day: DayKey, since: Minute },
}

#[derive(Debug, Clone)]
struct Guard {
    id: GuardId,
    state: DutyState,
    days: BTreeMap<DayKey, DayRecord>,
    /// For each minute, the number of days the guard slept through it.
    sleep_counts: [SleepCount; MINUTES],
}

impl Guard {
    fn new(id: GuardId) -> Self {
        Self {
            id,
            state: DutyState::OnDuty,
            days: BTreeMap::new(),
            sleep_counts: [0; MINUTES],
        }
    }
}

/// Tracked guards, iterated in the order their first shift started.
#[derive(Debug, Default)]
struct Roster {
    guards: Vec<Guard>,
    index_by_id: HashMap<GuardId, usize>,
}

impl Roster {
    fn get_or_insert(&mut self, id: GuardId) -> &mut Guard {
        let index = *self.index_by_id.entry(id).or_insert_with(|| {
            self.guards.push(Guard::new(id));
            self.guards.len() - 1
        });
        &mut self.guards[index]
    }

    fn get_mut(&mut self, id: GuardId) -> Option<&mut Guard> {
        let index = *self.index_by_id.get(&id)?;
        self.guards.get_mut(index)
    }

    #[cfg(test)]
    fn get(&self, id: GuardId) -> Option<&Guard> {
        let index = *self.index_by_id.get(&id)?;
        self.guards.get(index)
    }

    fn iter(&self) -> impl Iterator<Item = &Guard> {
        self.guards.iter()
    }
}

#[derive(thiserror::Error, Debug)]
enum SequenceError {
    #[error("\"{kind}\" at {timestamp} with no guard on duty")]
    NoGuardOnDuty {
        timestamp: NaiveDateTime,
        kind: EventKind,
    },

    #[error("guard #{guard_id} falls asleep at {timestamp} but is already asleep")]
    AlreadyAsleep {
        guard_id: GuardId,
        timestamp: NaiveDateTime,
    },

    #[error("guard #{guard_id} wakes up at {timestamp} but is not asleep")]
    NotAsleep {
        guard_id: GuardId,
        timestamp: NaiveDateTime,
    },

    #[error("event at {found} is earlier than previous event at {previous}")]
    OutOfOrder {
        previous: NaiveDateTime,
        found: NaiveDateTime,
    },
}

/// Accumulated state of replaying the log.
#[derive(Debug, Default)]
struct Tracker {
    roster: Roster,
    on_duty: Option<GuardId>,
    last_timestamp: Option<NaiveDateTime>,
}

fn begin_shift(guard: &mut Guard) {
    guard.state = DutyState::OnDuty;
}

/// Drop an unfinished sleep, leaving no trace in the day record.
fn abandon_sleep(guard: &mut Guard) {
    if let DutyState::Asleep { day, since } = guard.state {
        tracing::trace!(guard_id = guard.id, %day, since, "discarding sleep with no wake up");
        unmark_sleep_start(guard, day, since);
        guard.state = DutyState::OnDuty;
    }
}

fn unmark_sleep_start(guard: &mut Guard, day: DayKey, since: Minute) {
    if let Some(record) = guard.days.get_mut(&day) {
        record[usize::from(since)] = false;
    }
}

fn fall_asleep(guard: &mut Guard, event: &Event) -> Result<(), SequenceError> {
    if let DutyState::Asleep { .. } = guard.state {
        return Err(SequenceError::AlreadyAsleep {
            guard_id: guard.id,
            timestamp: event.timestamp,
        });
    }

    let day = event.day_key();
    let since = event.minute();
    let record = guard.days.entry(day).or_insert([false; MINUTES]);
    record[usize::from(since)] = true;
    guard.state = DutyState::Asleep { day, since };
    Ok(())
}

fn wake_up(guard: &mut Guard, event: &Event) -> Result<(), SequenceError> {
    let DutyState::Asleep { day, since } = guard.state else {
        return Err(SequenceError::NotAsleep {
            guard_id: guard.id,
            timestamp: event.timestamp,
        });
    };
    guard.state = DutyState::OnDuty;

    let wake_minute = event.minute();
    if wake_minute <= since {
        // woke the same minute, no minute was slept through
        unmark_sleep_start(guard, day, since);
        return Ok(());
    }

    let record = guard.days.entry(event.day_key()).or_insert([false; MINUTES]);
    for minute in usize::from(since)..usize::from(wake_minute) {
        record[minute] = true;
        guard.sleep_counts[minute] += 1;
    }
    Ok(())
}

/// Apply one event to the tracker.
///
/// Events must arrive in non-decreasing timestamp order.
fn track_event(mut tracker: Tracker, event: &Event) -> Result<Tracker, SequenceError> {
    if let Some(previous) = tracker.last_timestamp
        && event.timestamp < previous
    {
        return Err(SequenceError::OutOfOrder {
            previous,
            found: event.timestamp,
        });
    }
    tracker.last_timestamp = Some(event.timestamp);

    tracing::trace!(timestamp = %event.timestamp, kind = %event.kind, on_duty = ?tracker.on_duty);

    match event.kind {
        EventKind::ShiftStart(id) => {
            // the outgoing guard can't finish a sleep once relieved
            if let Some(outgoing) = tracker
                .on_duty
                .and_then(|on_duty_id| tracker.roster.get_mut(on_duty_id))
            {
                abandon_sleep(outgoing);
            }
            begin_shift(tracker.roster.get_or_insert(id));
            tracker.on_duty = Some(id);
        }
        EventKind::FallAsleep => fall_asleep(on_duty_guard(&mut tracker, event)?, event)?,
        EventKind::WakeUp => wake_up(on_duty_guard(&mut tracker, event)?, event)?,
    }
    Ok(tracker)
}

/// The guard whose shift most recently started.
fn on_duty_guard<'a>(
    tracker: &'a mut Tracker,
    event: &Event,
) -> Result<&'a mut Guard, SequenceError> {
    tracker
        .on_duty
        .and_then(|on_duty_id| tracker.roster.get_mut(on_duty_id))
        .ok_or(SequenceError::NoGuardOnDuty {
            timestamp: event.timestamp,
            kind: event.kind,
        })
}

/// Replay chronologically ordered events into a roster of guard sleep records.
fn track_shifts(events: &[Event]) -> Result<Roster, SequenceError> {
    let tracker = events.iter().try_fold(Tracker::default(), track_event)?;
    Ok(tracker.roster)
}

/// The parsed log, replayed into guard sleep records.
struct GuardSchedules {
    roster: Roster,
}

impl ParseData for GuardSchedules {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let event_parser = EventParser::new();
        let events: Vec<Event> = parse_input_lines(input, |_, line| Ok(event_parser.parse(line)?))
            .collect::<Result<_, _>>()?;
        tracing::debug!(events = events.len(), "parsed log entries");

        let roster = track_shifts(&sequence_events(events))?;
        tracing::debug!("guard shifts:\n{}", ShiftChart(&roster));

        Ok(Self { roster })
    }
}

/// A chart of when guards slept, a row per guard & day sorted by day.
///
/// ```text
/// Date   ID      Minute
///                000000000011111111112222222222333333333344444444445555555555
///                012345678901234567890123456789012345678901234567890123456789
/// 11-01  #10     .....####################.....#########################.....
/// ```
struct ShiftChart<'a>(&'a Roster);

impl Display for ShiftChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ROW_LABEL_WIDTH: usize = 15;

        let tens: String = (0..MINUTES).map(|minute| digit_char(minute / 10)).collect();
        let ones: String = (0..MINUTES).map(|minute| digit_char(minute % 10)).collect();
        writeln!(f, "{:<7}{:<8}Minute", "Date", "ID")?;
        writeln!(f, "{:ROW_LABEL_WIDTH$}{tens}", "")?;
        write!(f, "{:ROW_LABEL_WIDTH$}{ones}", "")?;

        let mut rows: Vec<(DayKey, GuardId, &DayRecord)> = self
            .0
            .iter()
            .flat_map(|guard| {
                guard
                    .days
                    .iter()
                    .map(|(&day, record)| (day, guard.id, record))
            })
            .collect();
        rows.sort_by_key(|&(day, id, _)| (day, id));

        for (day, id, record) in rows {
            let minutes: String = record
                .iter()
                .map(|&asleep| if asleep { '#' } else { '.' })
                .collect();
            write!(f, "\n{day}  {:<6}  {minutes}", format!("#{id}"))?;
        }
        Ok(())
    }
}

fn digit_char(digit: usize) -> char {
    u32::try_from(digit)
        .ok()
        .and_then(|digit| char::from_digit(digit, 10))
        .unwrap_or('?')
}

/*
Both parts pick a guard and a minute, and answer with the guard's ID multiplied by the minute.

For part 1, choose the guard with the most minutes asleep in total, then the minute that guard is
asleep on the most days.

For part 2, choose the guard and minute pair slept through on the most days.

Ties go to the guard whose first shift came earliest, then to the earliest minute.
*/

/// A chosen guard & minute, with the value that made them the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    guard_id: GuardId,
    minute: Minute,
    value: SleepCount,
}

impl Selection {
    fn answer(&self) -> u64 {
        u64::from(self.guard_id) * u64::from(self.minute)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("no guards found in log")]
struct EmptyInputError;

/// The first item with the maximum key, unlike [`Iterator::max_by_key`] which keeps the last.
fn first_max_by_key<T, K, F>(items: impl Iterator<Item = T>, mut key: F) -> Option<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    items
        .map(|item| (key(&item), item))
        .fold(None, |best: Option<(K, T)>, (item_key, item)| match best {
            Some((best_key, best_item)) if best_key >= item_key => Some((best_key, best_item)),
            _ => Some((item_key, item)),
        })
        .map(|(_, item)| item)
}

fn total_minutes_asleep(guard: &Guard) -> SleepCount {
    guard
        .days
        .values()
        .map(|record| record.iter().filter(|&&asleep| asleep).count())
        .checked_sum()
        .and_then(|total| SleepCount::try_from(total).ok())
        .expect("should not have integer overflow counting asleep minutes")
}

/// The minute a guard slept through on the most days, with that count of days.
fn most_asleep_minute(guard: &Guard) -> (Minute, SleepCount) {
    first_max_by_key(
        (0..).zip(guard.sleep_counts.iter().copied()),
        |&(_, count)| count,
    )
    .expect("sleep counts should not be empty")
}

fn most_total_sleep(roster: &Roster) -> Result<Selection, EmptyInputError> {
    let (guard, total) = first_max_by_key(
        roster.iter().map(|guard| (guard, total_minutes_asleep(guard))),
        |&(_, total)| total,
    )
    .ok_or(EmptyInputError)?;
    let (minute, _) = most_asleep_minute(guard);

    Ok(Selection {
        guard_id: guard.id,
        minute,
        value: total,
    })
}

fn most_frequent_minute(roster: &Roster) -> Result<Selection, EmptyInputError> {
    first_max_by_key(
        roster.iter().map(|guard| {
            let (minute, count) = most_asleep_minute(guard);
            Selection {
                guard_id: guard.id,
                minute,
                value: count,
            }
        }),
        |selection| selection.value,
    )
    .ok_or(EmptyInputError)
}

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = GuardSchedules;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let selection = most_total_sleep(&input.roster)?;
        tracing::debug!(?selection, "guard with most total sleep");
        Ok(selection.answer())
    }
}

impl Solution<PartTwo> for Day04 {
    type Input = GuardSchedules;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let selection = most_frequent_minute(&input.roster)?;
        tracing::debug!(?selection, "guard with most frequent minute asleep");
        Ok(selection.answer())
    }
}
