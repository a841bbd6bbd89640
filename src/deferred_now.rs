use chrono::{DateTime, FixedOffset, Local, Utc};

/// Deferred timestamp creation.
///
/// A log call creates one `DeferredNow`; the clock is only read if the
/// formatter actually asks for the time, and then only once.
#[derive(Debug, Default)]
pub struct DeferredNow(Option<DateTime<Utc>>);

impl DeferredNow {
    /// Constructs a new instance, but does not generate the timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }

    #[cfg(test)]
    pub(crate) fn fixed(ts: DateTime<Utc>) -> Self {
        Self(Some(ts))
    }

    /// Retrieve the timestamp.
    ///
    /// Requires mutability because the first caller will generate the timestamp.
    pub fn now(&mut self) -> DateTime<Utc> {
        *self.0.get_or_insert_with(Utc::now)
    }

    /// The timestamp, converted into the given time zone.
    pub fn now_in(&mut self, time_zone: TimeZone) -> DateTime<FixedOffset> {
        time_zone.convert(self.now())
    }
}

/// Time zone in which a formatter renders timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeZone {
    /// Coordinated universal time.
    #[default]
    Utc,
    /// The local time zone of the machine.
    Local,
    /// A fixed offset, in seconds east of UTC (e.g. `19_800` for UTC+05:30).
    Offset(i32),
}

impl TimeZone {
    pub(crate) fn convert(self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            TimeZone::Utc => ts.fixed_offset(),
            TimeZone::Local => ts.with_timezone(&Local).fixed_offset(),
            TimeZone::Offset(secs) => match FixedOffset::east_opt(secs) {
                Some(offset) => ts.with_timezone(&offset),
                None => ts.fixed_offset(),
            },
        }
    }
}
