pub mod problem;
pub mod request;
pub mod solution;
pub mod zone;

pub use problem::Problem;
pub use request::Request;
pub use solution::Solution;
pub use zone::Zone;
