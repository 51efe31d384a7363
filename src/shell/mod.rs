//! The interactive prompt/response loop.
//!
//! Console input and output are injected, so a whole session can be driven from
//! a byte slice and captured into a `Vec<u8>`.

pub mod prompt;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Month;
use tracing::{debug, error};

use crate::config::Config;
use crate::data::{load_city, City, FilterSelection, TripTable};
use crate::pager::Paginator;
use crate::stats::{self, SEPARATOR};

use prompt::{is_yes, Prompt, CITY, DAY, MONTH};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

/// Where the session is. Each variant carries what the next step needs.
#[derive(Debug)]
enum State {
    SelectCity,
    SelectMonth(City),
    SelectDay(City, Option<Month>),
    Loading(FilterSelection),
    DisplayingStats(TripTable),
    OptionalRawView(TripTable),
    PromptRestart,
    Terminated,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::SelectCity => "select_city",
            State::SelectMonth(_) => "select_month",
            State::SelectDay(..) => "select_day",
            State::Loading(_) => "loading",
            State::DisplayingStats(_) => "displaying_stats",
            State::OptionalRawView(_) => "optional_raw_view",
            State::PromptRestart => "prompt_restart",
            State::Terminated => "terminated",
        }
    }
}

/// How a raw-data viewing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawViewEnd {
    /// The user asked to stop.
    Declined,
    /// Every row has been shown.
    ReachedEnd,
    /// Input closed mid-session.
    InputClosed,
}

pub struct Shell<'c, R, W> {
    config: &'c Config,
    input: R,
    output: W,
}

impl<'c, R: BufRead, W: Write> Shell<'c, R, W> {
    pub fn new(config: &'c Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    /// Run sessions until the user declines to restart or input ends.
    ///
    /// Fails when a city's data cannot be loaded; the problem is reported on the
    /// output before returning.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::SelectCity;
        loop {
            debug!(state = state.name(), "enter");
            state = match state {
                State::Terminated => return Ok(()),
                other => self.step(other)?,
            };
        }
    }

    fn step(&mut self, state: State) -> Result<State> {
        Ok(match state {
            State::SelectCity => {
                writeln!(self.output, "{GREETING}")?;
                match self.select(&CITY)? {
                    Some(city) => State::SelectMonth(city),
                    None => State::Terminated,
                }
            }
            State::SelectMonth(city) => match self.select(&MONTH)? {
                Some(month) => State::SelectDay(city, month),
                None => State::Terminated,
            },
            State::SelectDay(city, month) => match self.select(&DAY)? {
                Some(day) => State::Loading(FilterSelection::new(city, month, day)),
                None => State::Terminated,
            },
            State::Loading(selection) => {
                let table = match load_city(self.config, selection.city) {
                    Ok(table) => table,
                    Err(err) => {
                        error!(city = %selection.city, %err, "data unavailable");
                        writeln!(
                            self.output,
                            "\nSorry, the {} data is unavailable: {err}",
                            selection.city
                        )?;
                        return Err(err)
                            .with_context(|| format!("loading {} data", selection.city));
                    }
                };
                State::DisplayingStats(selection.apply(&table))
            }
            State::DisplayingStats(table) => {
                stats::write_report(&mut self.output, &table)?;
                State::OptionalRawView(table)
            }
            State::OptionalRawView(table) => {
                match self.confirm("Would you like to see the raw data?")? {
                    Some(true) => {
                        if self.view_raw(&table)? == RawViewEnd::InputClosed {
                            return Ok(State::Terminated);
                        }
                        State::PromptRestart
                    }
                    Some(false) => State::PromptRestart,
                    None => State::Terminated,
                }
            }
            State::PromptRestart => match self.confirm("Would you like to restart?")? {
                Some(true) => State::SelectCity,
                _ => State::Terminated,
            },
            State::Terminated => State::Terminated,
        })
    }

    /// Page through `table` until the user stops or the rows run out.
    pub fn view_raw(&mut self, table: &TripTable) -> Result<RawViewEnd> {
        let mut pager = Paginator::new(table, self.config.page_size);
        loop {
            let Some(page) = pager.next_page() else {
                writeln!(self.output, "You have reached the end.")?;
                return Ok(RawViewEnd::ReachedEnd);
            };
            writeln!(self.output, "{}", page.caption())?;
            let rendered = page
                .render(&table.headers)
                .context("rendering raw rows")?;
            writeln!(self.output, "{rendered}")?;
            debug!(cursor = pager.cursor(), "page shown");

            if page.at_end {
                writeln!(self.output, "You have reached the end.")?;
                return Ok(RawViewEnd::ReachedEnd);
            }
            match self.confirm("Want to see more?")? {
                Some(true) => continue,
                Some(false) => return Ok(RawViewEnd::Declined),
                None => return Ok(RawViewEnd::InputClosed),
            }
        }
    }

    /// Ask until the answer matches the menu. `None` when input ends.
    fn select<T>(&mut self, prompt: &Prompt<T>) -> Result<Option<T>> {
        writeln!(self.output, "{}", prompt.question())?;
        while let Some(line) = self.read_line()? {
            if let Some(choice) = prompt.parse(&line) {
                writeln!(self.output, "{SEPARATOR}")?;
                return Ok(Some(choice));
            }
            debug!(menu = prompt.name, input = line.trim(), "rejected");
            writeln!(self.output, "{}", prompt.rejection())?;
        }
        Ok(None)
    }

    /// Yes/no question. `None` when input ends.
    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        writeln!(self.output, "\n{question} Enter yes or no.")?;
        Ok(self.read_line()?.map(|answer| is_yes(&answer)))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("reading console input")?;
        Ok((n > 0).then_some(line))
    }
}
