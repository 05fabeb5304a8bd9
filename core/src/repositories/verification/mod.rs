pub mod mock;
pub mod repository;

pub use mock::MockVerificationRepository;
pub use repository::VerificationRepository;
