use crate::domain::model::{
    Department, DepartmentPatch, Employee, EmployeePatch, NewDepartment, NewEmployee,
};
use crate::domain::records::{
    Attendance, AttendancePatch, LeaveRequest, LeaveRequestPatch, NewAttendance, NewLeaveRequest,
    NewSalary, Salary, SalaryPatch,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn api_token(&self) -> Option<&str>;
    fn json_logs(&self) -> bool;

    fn log_level(&self) -> Option<&str> {
        None
    }
}

/// A collection exposed by the remote backend under `/{PATH}`.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;
    /// Plural noun used in error messages.
    const LABEL: &'static str;
    type New: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;
}

#[async_trait]
pub trait RemoteCollection<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>>;
    async fn get(&self, id: u64) -> Result<R>;
    async fn create(&self, new: &R::New) -> Result<R>;
    async fn update(&self, id: u64, patch: &R::Patch) -> Result<R>;
    async fn delete(&self, id: u64) -> Result<()>;
}

impl Resource for Employee {
    const PATH: &'static str = "employees";
    const LABEL: &'static str = "employees";
    type New = NewEmployee;
    type Patch = EmployeePatch;
}

impl Resource for Department {
    const PATH: &'static str = "departments";
    const LABEL: &'static str = "departments";
    type New = NewDepartment;
    type Patch = DepartmentPatch;
}

impl Resource for Attendance {
    const PATH: &'static str = "attendances";
    const LABEL: &'static str = "attendances";
    type New = NewAttendance;
    type Patch = AttendancePatch;
}

impl Resource for LeaveRequest {
    const PATH: &'static str = "leave-requests";
    const LABEL: &'static str = "leave requests";
    type New = NewLeaveRequest;
    type Patch = LeaveRequestPatch;
}

impl Resource for Salary {
    const PATH: &'static str = "salaries";
    const LABEL: &'static str = "salaries";
    type New = NewSalary;
    type Patch = SalaryPatch;
}
