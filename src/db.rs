pub mod user_repo;
pub use user_repo::UserRepository;
pub mod department_repo;
pub use department_repo::DepartmentRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod period_repo;
pub use period_repo::PeriodRepository;
pub mod assignment_repo;
pub use assignment_repo::AssignmentRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
