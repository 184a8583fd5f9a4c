use std::io::{BufRead, Write};

use rps_common::{
    choice::{ChoiceGenerator, UniformSource},
    model::{
        game::{describe_round, evaluate, Play},
        series::{SeriesResult, SeriesState},
    },
};
use tracing::{debug, info};

use crate::error::ConsoleError;

pub const PROMPT: &str = "Select your play (rock, paper, or scissors)";
pub const INVALID_SELECTION: &str =
    "Invalid selection. Expected one of: \"rock\", \"paper\", or \"scissors\".";

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub best_of: i64,
    pub seed: Option<u64>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            best_of: 5,
            seed: None,
        }
    }
}

/// Prompt loop over any line source and sink.
pub struct ConsoleGame<R, W, S> {
    input: R,
    output: W,
    generator: ChoiceGenerator<S>,
}

impl<R, W, S> ConsoleGame<R, W, S>
where
    R: BufRead,
    W: Write,
    S: UniformSource,
{
    pub fn new(input: R, output: W, source: S) -> Self {
        ConsoleGame {
            input,
            output,
            generator: ChoiceGenerator::new(source),
        }
    }

    /// Plays rounds until `best_of` non-tied rounds are in, then prints the score.
    pub fn play_series(&mut self, best_of: i64) -> Result<SeriesResult, ConsoleError> {
        let mut state = SeriesState::new(best_of)?;
        info!("Starting best of {}", best_of);

        let mut line = String::new();
        while !state.is_complete() {
            writeln!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConsoleError::InputClosed);
            }
            let player = match line.parse::<Play>() {
                Ok(play) => play,
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "{}", INVALID_SELECTION)?;
                    continue;
                }
            };

            let computer = self.generator.next();
            let outcome = evaluate(player, computer);
            writeln!(self.output, "{}", describe_round(outcome, player, computer))?;
            state = state.record_round(outcome)?;
        }

        let result = state.result();
        writeln!(self.output, "{}", result.message())?;
        Ok(result)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
