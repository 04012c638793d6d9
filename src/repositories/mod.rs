pub mod certificate_repository;
pub mod collaboration_repository;
pub mod scholar_repository;
pub mod user_repository;

pub use certificate_repository::{
    CertificateFilter, CertificateRepository, NewCertificate, ReviewDecision,
};
pub use collaboration_repository::{Author, CollaborationRepository, NewScheduledItem, ThreadEntry};
pub use scholar_repository::{ScholarRepository, ScholarUpdateOutcome};
pub use user_repository::{NewUser, UserRepository, UserUpdate};
