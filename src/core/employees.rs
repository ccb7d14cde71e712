use crate::core::store::CollectionStore;
use crate::domain::model::{Employee, EmployeeId, EmployeePatch, EmployeeRecord, NewEmployee};
use crate::utils::error::{HrError, Result};

impl CollectionStore {
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        self.read("listing employees", |c| {
            Ok(c.employees().iter().map(|e| c.view_employee(e)).collect())
        })
    }

    pub fn get_employee(&self, id: EmployeeId) -> Result<Employee> {
        self.read("fetching the employee", |c| {
            c.find_employee(id)
                .map(|e| c.view_employee(e))
                .ok_or_else(|| HrError::employee_not_found(id))
        })
    }

    /// Appends a new employee and bumps the referenced department's count.
    /// A reference to an unknown department is stored as-is.
    pub fn create_employee(&self, new: NewEmployee) -> Result<Employee> {
        self.write("creating the employee", |c| {
            let record = c
                .append_employee(|id| EmployeeRecord::from_new(id, new))
                .clone();
            if c.find_department(record.department_id).is_none() {
                tracing::warn!(
                    "Employee {} references unknown department {}",
                    record.id,
                    record.department_id
                );
            }
            c.adjust_department_count(record.department_id, 1);
            tracing::info!("Created employee {}", record.id);
            Ok(c.view_employee(&record))
        })
    }

    /// Merges `patch` into the stored employee. Moving to another department
    /// shifts one unit of `employee_count` from the old department to the new.
    pub fn update_employee(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee> {
        self.write("updating the employee", |c| {
            let previous = c
                .find_employee(id)
                .map(|e| e.department_id)
                .ok_or_else(|| HrError::employee_not_found(id))?;

            if let Some(target) = patch.department.map(|d| d.id) {
                if target != previous {
                    tracing::debug!(
                        "Moving employee {} from department {} to {}",
                        id,
                        previous,
                        target
                    );
                    c.adjust_department_count(previous, -1);
                    c.adjust_department_count(target, 1);
                }
            }

            let record = c
                .employee_mut(id)
                .ok_or_else(|| HrError::employee_not_found(id))?;
            record.apply(patch);
            let record = record.clone();
            Ok(c.view_employee(&record))
        })
    }

    pub fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        self.write("deleting the employee", |c| {
            let removed = c
                .remove_employee(id)
                .ok_or_else(|| HrError::employee_not_found(id))?;
            c.adjust_department_count(removed.department_id, -1);
            tracing::info!("Deleted employee {}", id);
            Ok(())
        })
    }
}
