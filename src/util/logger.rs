use std::fmt::{Display, Formatter};

use crate::{util::Code, Lex};

use super::Log;

impl<T> Log<T> {
    /// The label carried by an active level, if any.
    pub fn label(&self) -> Option<&T> {
        match self {
            Log::None => None,
            Log::Default(label)
            | Log::Success(label)
            | Log::Result(label)
            | Log::Verbose(label) => Some(label),
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}", label),
            None => Ok(()),
        }
    }
}

impl<TL: Display> Log<TL> {
    /// Print the outcome of a rule match attempt, honoring the log level:
    /// successes report from `Success` upward, misses from `Result` upward.
    pub fn trace_rule_result(&self, _pointer: usize, _matched: &[Lex], _code: &Code) {
        #[cfg(debug_assertions)]
        match _matched.last() {
            Some(lex) => {
                if matches!(self, Log::Success(_) | Log::Result(_) | Log::Verbose(_)) {
                    println!(
                        "[{}; RuleSuccess]: category: {:?} from {} to {}",
                        self,
                        lex.category,
                        _code.obtain_position(lex.start),
                        _code.obtain_position(lex.end)
                    )
                }
            }
            None => {
                if matches!(self, Log::Result(_) | Log::Verbose(_)) {
                    println!("[{}; RuleMiss]: at {}", self, _code.obtain_position(_pointer))
                }
            }
        }
    }
}
