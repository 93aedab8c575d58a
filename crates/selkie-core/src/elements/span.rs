//! Gantt spans: named time windows on a minute-resolution dateline.

use crate::diagram::DiagramType;
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleDomain};
use crate::object::{GraphObject, Name, Printable, PropertyHost};
use crate::property::{Property, PropertyOf, PropertyStore};
use crate::tag::short_type_name;
use regex::Regex;
use std::any::Any;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

/// Minute-resolution time of day, written `HH:MM`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTick {
    hour: u8,
    minute: u8,
}

impl DateTick {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidDateTick {
                value: format!("{hour}:{minute}"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl FromStr for DateTick {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidDateTick {
            value: text.to_string(),
        };
        let (hour, minute) = text.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for DateTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Add<DateDuration> for DateTick {
    type Output = DateTick;

    // Minutes carry into hours; a sum past midnight keeps counting
    // hours instead of wrapping to the next day.
    fn add(self, duration: DateDuration) -> DateTick {
        let minutes = u32::from(self.minute) + u32::from(duration.minutes);
        DateTick {
            hour: self.hour + duration.hours + (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

/// Length of a span, written `<n>h<n>m` with either part optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateDuration {
    hours: u8,
    minutes: u8,
}

impl DateDuration {
    pub fn new(hours: u8, minutes: u8) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(Error::InvalidDateDuration {
                value: format!("{hours}h{minutes}m"),
            });
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(self) -> u8 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }
}

impl FromStr for DateDuration {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidDateDuration {
            value: text.to_string(),
        };
        let re = DURATION_RE
            .get_or_init(|| Regex::new(r"^(?:(\d+)h\s*)?(?:(\d+)m)?$").expect("duration pattern"));
        let caps = re.captures(text).ok_or_else(invalid)?;
        let (hours, minutes) = (caps.get(1), caps.get(2));
        if hours.is_none() && minutes.is_none() {
            return Err(invalid());
        }
        let hours: u8 = hours.map_or(Ok(0), |m| m.as_str().parse()).map_err(|_| invalid())?;
        let minutes: u8 = minutes.map_or(Ok(0), |m| m.as_str().parse()).map_err(|_| invalid())?;
        Self::new(hours, minutes).map_err(|_| invalid())
    }
}

impl fmt::Display for DateDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 && self.minutes == 0 {
            return f.write_str("0m");
        }
        if self.hours != 0 {
            write!(f, "{}h", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}m", self.minutes)?;
        }
        Ok(())
    }
}

/// Start/end pair of a span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanWindow {
    start: DateTick,
    end: DateTick,
}

impl SpanWindow {
    /// Window over two explicit ticks.
    pub fn between(start: DateTick, end: DateTick) -> Result<Self> {
        if end < start {
            return Err(Error::DiscontinuousSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window opening at `start` and lasting `duration`.
    pub fn lasting(start: DateTick, duration: DateDuration) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Window chained directly after `previous`.
    pub fn after(previous: &SpanWindow, duration: DateDuration) -> Self {
        Self::lasting(previous.end, duration)
    }

    /// Window chained after `previous` and closing at `end`.
    pub fn until(previous: &SpanWindow, end: DateTick) -> Result<Self> {
        Self::between(previous.end, end)
    }

    pub fn start(&self) -> DateTick {
        self.start
    }

    pub fn end(&self) -> DateTick {
        self.end
    }
}

impl Property for SpanWindow {
    fn render(&self, diagram: DiagramType) -> String {
        match diagram {
            DiagramType::Gantt => format!("{}, {}", self.start, self.end),
            _ => String::new(),
        }
    }
}

impl<U: HandleDomain> PropertyOf<Span<U>> for SpanWindow {}

#[derive(Debug)]
pub struct Span<U: HandleDomain> {
    handle: Handle<U>,
    props: PropertyStore,
}

impl<U: HandleDomain> PropertyHost for Span<U> {
    fn store(&self) -> &PropertyStore {
        &self.props
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

impl<U: HandleDomain> GraphObject<U> for Span<U> {
    fn fresh(handle: Handle<U>) -> Self {
        let mut props = PropertyStore::default();
        props.insert(Printable);
        Self { handle, props }
    }

    fn handle(&self) -> &Handle<U> {
        &self.handle
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn render_body(&self, diagram: DiagramType) -> Result<String> {
        match diagram {
            DiagramType::Gantt => {
                let window = self.store().get::<SpanWindow>()?;
                Ok(format!(
                    "{}: {}, {}",
                    self.store().render_property::<Name>(diagram),
                    self.handle.render(diagram),
                    window.render(diagram),
                ))
            }
            _ => Err(Error::UnsupportedDiagramType {
                element: short_type_name::<Self>(),
                diagram,
            }),
        }
    }
}
