pub mod career;
pub mod college;
pub mod planning;
pub mod user;
