//! Wire models for the payroll backend REST contract
//!
//! Field names are English; the serde renames carry the backend's
//! Portuguese JSON keys.

pub mod benefit;
pub mod dashboard;
pub mod employee;
pub mod import;
pub mod org_chart;
pub mod organization;
pub mod payroll;
pub mod report;
pub mod rubric;
pub mod user;

pub use benefit::{Benefit, BenefitRequest};
pub use dashboard::{DashboardStats, JobRoleStats, MonthlyTrend, RubricStats, UnitStats};
pub use employee::{Employee, EmployeeRequest};
pub use import::{ImportKind, ImportOutcome};
pub use org_chart::{
    CostCenterAssignment, EmployeeAssignment, OrgChartCommand, OrgChartOutcome, OrgNode,
    OrgNodeRequest,
};
pub use organization::{BusinessLine, CostCenter, CostCenterRequest, DescriptionRequest, JobRole};
pub use payroll::{PayrollEntry, PayrollEntryRequest, PayrollSummary, Period, net_total};
pub use report::{Report, ReportKind, ReportRequest, ReportStatus};
pub use rubric::{Rubric, RubricKind, RubricRequest};
pub use user::{LoginRequest, PasswordChange, User, UserFilter, UserRequest};
