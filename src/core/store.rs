use crate::domain::model::{Department, DepartmentId, Employee, EmployeeId, EmployeeRecord};
use crate::utils::error::{HrError, Result};
use std::sync::RwLock;

/// Monotonic id source. The first id handed out is 1 and ids are never reused.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// The two collections plus their id sequences, in insertion order.
#[derive(Debug, Default)]
pub struct Collections {
    employees: Vec<EmployeeRecord>,
    departments: Vec<Department>,
    employee_ids: IdSequence,
    department_ids: IdSequence,
}

impl Collections {
    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn find_employee(&self, id: EmployeeId) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn find_department(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn employee_mut(&mut self, id: EmployeeId) -> Option<&mut EmployeeRecord> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    pub fn department_mut(&mut self, id: DepartmentId) -> Option<&mut Department> {
        self.departments.iter_mut().find(|d| d.id == id)
    }

    /// Number of employees currently pointing at `department_id`.
    pub fn live_employee_count(&self, department_id: DepartmentId) -> u64 {
        self.employees
            .iter()
            .filter(|e| e.department_id == department_id)
            .count() as u64
    }

    pub fn append_department(&mut self, build: impl FnOnce(DepartmentId) -> Department) -> &Department {
        let id = self.department_ids.next_id();
        self.departments.push(build(id));
        &self.departments[self.departments.len() - 1]
    }

    pub fn append_employee(
        &mut self,
        build: impl FnOnce(EmployeeId) -> EmployeeRecord,
    ) -> &EmployeeRecord {
        let id = self.employee_ids.next_id();
        self.employees.push(build(id));
        &self.employees[self.employees.len() - 1]
    }

    pub fn remove_department(&mut self, id: DepartmentId) -> Option<Department> {
        let index = self.departments.iter().position(|d| d.id == id)?;
        Some(self.departments.remove(index))
    }

    pub fn remove_employee(&mut self, id: EmployeeId) -> Option<EmployeeRecord> {
        let index = self.employees.iter().position(|e| e.id == id)?;
        Some(self.employees.remove(index))
    }

    /// Shifts a department's cached count by `delta` if the department exists.
    pub fn adjust_department_count(&mut self, id: DepartmentId, delta: i64) {
        if let Some(department) = self.department_mut(id) {
            department.adjust_employee_count(delta);
        }
    }

    pub fn view_employee(&self, record: &EmployeeRecord) -> Employee {
        record.to_employee(&self.departments)
    }
}

/// Process-wide holder of every employee and department record.
///
/// Each operation runs entirely inside one lock section, so a mutation is
/// never observed half-applied by another request.
#[derive(Debug, Default)]
pub struct CollectionStore {
    inner: RwLock<Collections>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<T>(&self, action: &str, f: impl FnOnce(&Collections) -> Result<T>) -> Result<T> {
        let guard = self.inner.read().map_err(|_| {
            tracing::error!("Collection store lock poisoned while {}", action);
            HrError::unexpected(action)
        })?;
        f(&guard)
    }

    pub fn write<T>(
        &self,
        action: &str,
        f: impl FnOnce(&mut Collections) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| {
            tracing::error!("Collection store lock poisoned while {}", action);
            HrError::unexpected(action)
        })?;
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_id_sequence_starts_at_one() {
        let mut seq = IdSequence::default();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let store = CollectionStore::new();
        store
            .write("seeding", |c| {
                for name in ["A", "B"] {
                    c.append_department(|id| Department {
                        id,
                        name: name.to_string(),
                        location: None,
                        manager: None,
                        description: None,
                        employee_count: 0,
                        created_date: None,
                    });
                }
                c.remove_department(2);
                let next = c.append_department(|id| Department {
                    id,
                    name: "C".to_string(),
                    location: None,
                    manager: None,
                    description: None,
                    employee_count: 0,
                    created_date: None,
                });
                assert_eq!(next.id, 3);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_poisoned_lock_maps_to_unexpected() {
        let store = CollectionStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.write("seeding", |_| -> Result<()> { panic!("boom") })
        }));

        let err = store
            .read("listing departments", |c| Ok(c.departments().len()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(
            err.to_string(),
            "An error occurred while listing departments"
        );
    }
}
