// Reenact: Scoring Errors
//
// These never cross the public matcher boundary; `matcher::match_template`
// turns every variant into the neutral "computation error" result.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MatchError {
    #[error("reference template has no usable samples")]
    DegenerateReference,

    #[error("score is not a finite number (total diff {total_diff}, aligned length {aligned})")]
    NonFiniteScore { total_diff: f64, aligned: usize },
}
