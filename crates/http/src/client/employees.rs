//! Employee API client methods

use folha_core::Validate;
use folha_core::models::{Employee, EmployeeRequest};

use super::{ApiRequest, ClientError, FolhaClient};

impl FolhaClient {
    /// All employees
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.execute(ApiRequest::get("/funcionarios")).await
    }

    /// Employee by id
    pub async fn get_employee(&self, id: i64) -> Result<Employee, ClientError> {
        self.execute(ApiRequest::get(format!("/funcionarios/{id}"))).await
    }

    /// Create an employee
    pub async fn create_employee(&self, employee: &EmployeeRequest) -> Result<Employee, ClientError> {
        employee.validate()?;
        self.execute(ApiRequest::post("/funcionarios").json(employee)?).await
    }

    /// Replace an employee record
    pub async fn update_employee(
        &self,
        id: i64,
        employee: &EmployeeRequest,
    ) -> Result<Employee, ClientError> {
        employee.validate()?;
        self.execute(ApiRequest::put(format!("/funcionarios/{id}")).json(employee)?)
            .await
    }

    /// Delete an employee
    pub async fn delete_employee(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/funcionarios/{id}")))
            .await
    }
}
