//! Application services for intern records and task status tracking.

mod intern;
mod requests;
mod response;

pub use intern::{InternList, InternService, InternServiceError, InternServiceResult};
pub use requests::{CreateInternRequest, ListInternsRequest, UpdateInternRequest};
pub use response::{ErrorKind, ServiceResponse};
