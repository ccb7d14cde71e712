use crate::core::store::CollectionStore;
use crate::domain::model::{Department, DepartmentId, DepartmentPatch, NewDepartment};
use crate::utils::error::{HrError, Result};
use chrono::Utc;

impl CollectionStore {
    /// All departments, with their stored (possibly stale) counts.
    pub fn list_departments(&self) -> Result<Vec<Department>> {
        self.read("listing departments", |c| Ok(c.departments().to_vec()))
    }

    /// Looks up a department and refreshes its `employee_count` from the
    /// employee collection before returning it.
    pub fn get_department(&self, id: DepartmentId) -> Result<Department> {
        self.write("fetching the department", |c| {
            let live = c.live_employee_count(id);
            let department = c
                .department_mut(id)
                .ok_or_else(|| HrError::department_not_found(id))?;
            department.employee_count = live;
            Ok(department.clone())
        })
    }

    pub fn create_department(&self, new: NewDepartment) -> Result<Department> {
        self.write("creating the department", |c| {
            let department = c.append_department(|id| Department {
                id,
                name: new.name,
                location: new.location,
                manager: new.manager,
                description: new.description,
                employee_count: 0,
                created_date: Some(Utc::now()),
            });
            tracing::info!("Created department {} ({})", department.id, department.name);
            Ok(department.clone())
        })
    }

    pub fn update_department(&self, id: DepartmentId, patch: DepartmentPatch) -> Result<Department> {
        self.write("updating the department", |c| {
            let department = c
                .department_mut(id)
                .ok_or_else(|| HrError::department_not_found(id))?;
            department.apply(patch);
            Ok(department.clone())
        })
    }

    /// Removes a department, refusing while any employee still references it.
    pub fn delete_department(&self, id: DepartmentId) -> Result<DepartmentId> {
        self.write("deleting the department", |c| {
            if c.find_department(id).is_none() {
                return Err(HrError::department_not_found(id));
            }

            let live = c.live_employee_count(id);
            tracing::debug!("Department {} has {} employees", id, live);
            if live > 0 {
                return Err(HrError::Conflict {
                    message: format!(
                        "Cannot delete department with {} employees. Please reassign or remove all employees first.",
                        live
                    ),
                });
            }

            c.remove_department(id)
                .map(|removed| removed.id)
                .ok_or_else(|| HrError::department_not_found(id))
        })
    }

    pub fn change_employee_count(&self, id: DepartmentId, delta: i64) -> Result<Department> {
        self.write("updating the employee count", |c| {
            let department = c
                .department_mut(id)
                .ok_or_else(|| HrError::department_not_found(id))?;
            department.adjust_employee_count(delta);
            Ok(department.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DepartmentKey, NewEmployee};
    use crate::utils::error::ErrorKind;

    fn new_department(name: &str) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
            location: Some("NYC".to_string()),
            ..Default::default()
        }
    }

    fn new_employee(department: DepartmentId) -> NewEmployee {
        NewEmployee {
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            email: "alan@example.com".into(),
            phone: None,
            address: None,
            position: None,
            join_date: None,
            department: DepartmentKey { id: department },
        }
    }

    #[test]
    fn test_create_assigns_id_and_zero_count() {
        let store = CollectionStore::new();
        let eng = store.create_department(new_department("Eng")).unwrap();
        let ops = store.create_department(new_department("Ops")).unwrap();

        assert_eq!(eng.id, 1);
        assert_eq!(ops.id, 2);
        assert_eq!(eng.employee_count, 0);
        assert!(eng.created_date.is_some());
        assert_eq!(store.list_departments().unwrap().len(), 2);
    }

    #[test]
    fn test_get_recomputes_stale_count() {
        let store = CollectionStore::new();
        let eng = store.create_department(new_department("Eng")).unwrap();
        store.create_employee(new_employee(eng.id)).unwrap();

        // push the cached value out of sync on purpose
        store.change_employee_count(eng.id, 10).unwrap();
        assert_eq!(store.list_departments().unwrap()[0].employee_count, 11);

        let fetched = store.get_department(eng.id).unwrap();
        assert_eq!(fetched.employee_count, 1);
        // and the repaired value was written back
        assert_eq!(store.list_departments().unwrap()[0].employee_count, 1);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = CollectionStore::new();
        let eng = store.create_department(new_department("Eng")).unwrap();

        let updated = store
            .update_department(
                eng.id,
                DepartmentPatch {
                    name: Some("Engineering".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Engineering");
        assert_eq!(updated.location.as_deref(), Some("NYC"));
        assert_eq!(updated.created_date, eng.created_date);
    }

    #[test]
    fn test_missing_department_is_not_found() {
        let store = CollectionStore::new();
        assert_eq!(store.get_department(9).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            store
                .update_department(9, DepartmentPatch::default())
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(store.delete_department(9).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            store.change_employee_count(9, 1).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_delete_blocked_while_employees_reference_it() {
        let store = CollectionStore::new();
        let eng = store.create_department(new_department("Eng")).unwrap();
        let alan = store.create_employee(new_employee(eng.id)).unwrap();

        // a zeroed cache must not bypass the live check
        store.change_employee_count(eng.id, -100).unwrap();

        let err = store.delete_department(eng.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.to_string(),
            "Cannot delete department with 1 employees. Please reassign or remove all employees first."
        );
        assert_eq!(store.list_departments().unwrap().len(), 1);

        store.delete_employee(alan.id).unwrap();
        assert_eq!(store.delete_department(eng.id).unwrap(), eng.id);
        assert!(store.list_departments().unwrap().is_empty());
    }

    #[test]
    fn test_change_employee_count_clamps() {
        let store = CollectionStore::new();
        let eng = store.create_department(new_department("Eng")).unwrap();

        assert_eq!(store.change_employee_count(eng.id, 3).unwrap().employee_count, 3);
        assert_eq!(store.change_employee_count(eng.id, -1).unwrap().employee_count, 2);
        assert_eq!(store.change_employee_count(eng.id, -7).unwrap().employee_count, 0);
    }
}
