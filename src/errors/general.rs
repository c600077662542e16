//! Errors with no particular originating subsystem

use super::codes::{general as codes, ErrorCategory, Status400, Status500};
use super::variants::error_category;

error_category! {
    /// Unclassified client or server failure
    pub enum GeneralError in ErrorCategory::General;

    /// Generic client-caused failure
    ClientError => (Status400, codes::CLIENT_ERROR),
    /// Generic server-caused failure
    ServerError => (Status500, codes::SERVER_ERROR),
}
