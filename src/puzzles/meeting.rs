//! Scheduling a one hour meeting. Simona has to attend together with at
//! least one of Marija and Petar, and everybody who attends has to be free
//! at the starting hour.

use crate::puzzles::csp::{Assignment, Constraint, Csp, Value};
use crate::InputError;
use serde::Serialize;
use std::fmt::Display;

pub const HOURS: std::ops::RangeInclusive<Value> = 12..=20;

pub static SIMONA_FREE: [Value; 4] = [13, 14, 16, 19];
pub static MARIJA_FREE: [Value; 3] = [14, 15, 18];
pub static PETAR_FREE: [Value; 6] = [12, 13, 16, 17, 18, 19];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub simona: bool,
    pub marija: bool,
    pub petar: bool,
    pub hour: Value,
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Simona: {}, Marija: {}, Petar: {}, hour: {}",
            u8::from(self.simona),
            u8::from(self.marija),
            u8::from(self.petar),
            self.hour
        )
    }
}

#[derive(Debug, Clone)]
pub struct Meeting {
    csp: Csp,
}

impl Meeting {
    pub fn new() -> Result<Self, InputError> {
        let mut csp = Csp::new("meeting");
        let simona = csp.add_variable("Simona", 0..=1);
        let marija = csp.add_variable("Marija", 0..=1);
        let petar = csp.add_variable("Petar", 0..=1);
        let hour = csp.add_variable("hour", HOURS);

        csp.add_constraint(Constraint::predicate(vec![simona], |values| {
            values[0] == 1
        }))?;
        csp.add_constraint(Constraint::predicate(vec![marija, petar], |values| {
            values[0] + values[1] >= 1
        }))?;
        for (person, free) in [
            (simona, &SIMONA_FREE[..]),
            (marija, &MARIJA_FREE[..]),
            (petar, &PETAR_FREE[..]),
        ] {
            csp.add_constraint(Constraint::predicate(vec![person, hour], move |values| {
                values[0] == 0 || free.contains(&values[1])
            }))?;
        }
        Ok(Self { csp })
    }

    pub fn csp(&self) -> &Csp {
        &self.csp
    }

    /// Every valid schedule, ordered by attendance and then by hour.
    pub fn all_schedules(&self) -> Vec<Schedule> {
        self.csp
            .solutions()
            .filter_map(|assignment| Self::schedule(&assignment))
            .collect()
    }

    fn schedule(assignment: &Assignment) -> Option<Schedule> {
        Some(Schedule {
            simona: assignment.get(0)? == 1,
            marija: assignment.get(1)? == 1,
            petar: assignment.get(2)? == 1,
            hour: assignment.get(3)?,
        })
    }
}
