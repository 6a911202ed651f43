mod request;
pub mod response;
pub mod session;

pub use request::{BaseRequest, FormData, Headers};
pub use response::{HttpResponse, ResponseBody};
pub use session::{Session, SessionId};
