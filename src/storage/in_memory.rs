//! In-memory implementation of OrgService for testing and development

use crate::core::criteria::{DepartmentSortedType, EmployeeCriteria, EmployeeSortedType};
use crate::core::entity::{DepartmentRecord, EmployeeRecord, Gender, NamedEntity};
use crate::core::error::{BusinessError, ServiceError};
use crate::core::input::{DepartmentInput, EmployeeInput};
use crate::core::service::OrgService;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory directory store
///
/// Serves the full [`OrgService`] contract, business rules included, from
/// id-ordered maps behind an async `RwLock`. Cloning the store shares the
/// underlying data.
#[derive(Clone)]
pub struct InMemoryOrgStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug)]
struct StoreInner {
    departments: BTreeMap<i64, DepartmentRecord>,
    employees: BTreeMap<i64, EmployeeRecord>,
    next_department_id: i64,
    next_employee_id: i64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            departments: BTreeMap::new(),
            employees: BTreeMap::new(),
            next_department_id: 1,
            next_employee_id: 1,
        }
    }
}

impl InMemoryOrgStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    /// Create a store seeded with a small demo data set: two departments
    /// and five employees with a two-level reporting chain
    pub fn sample() -> Self {
        let mut inner = StoreInner::default();
        let develop = inner.insert_department("Develop");
        let market = inner.insert_department("Market");
        let jim = inner.insert_employee("Jim", Gender::Male, 10000, develop, None);
        inner.insert_employee("Kate", Gender::Female, 8000, develop, Some(jim));
        inner.insert_employee("Bob", Gender::Male, 7000, develop, Some(jim));
        let linda = inner.insert_employee("Linda", Gender::Female, 9000, market, None);
        inner.insert_employee("Tom", Gender::Male, 6000, market, Some(linda));
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }
}

impl Default for InMemoryOrgStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInner {
    fn insert_department(&mut self, name: &str) -> i64 {
        let id = self.next_department_id;
        self.next_department_id += 1;
        self.departments.insert(
            id,
            DepartmentRecord {
                id,
                name: name.to_string(),
            },
        );
        id
    }

    fn insert_employee(
        &mut self,
        name: &str,
        gender: Gender,
        salary: i64,
        department_id: i64,
        supervisor_id: Option<i64>,
    ) -> i64 {
        let id = self.next_employee_id;
        self.next_employee_id += 1;
        self.employees.insert(
            id,
            EmployeeRecord {
                id,
                name: name.to_string(),
                gender,
                salary,
                department_id,
                supervisor_id,
            },
        );
        id
    }

    fn employees_of(&self, department_id: i64) -> Vec<EmployeeRecord> {
        self.employees
            .values()
            .filter(|record| record.department_id == department_id)
            .cloned()
            .collect()
    }

    fn subordinates_of(&self, employee_id: i64) -> Vec<EmployeeRecord> {
        self.employees
            .values()
            .filter(|record| record.supervisor_id == Some(employee_id))
            .cloned()
            .collect()
    }

    /// Referential checks shared by create and modify
    fn check_references(&self, input: &EmployeeInput) -> Result<(), ServiceError> {
        if !self.departments.contains_key(&input.department_id) {
            return Err(BusinessError::IllegalDepartment {
                department_id: input.department_id,
            }
            .into());
        }
        if let Some(supervisor_id) = input.supervisor_id {
            if !self.employees.contains_key(&supervisor_id) {
                return Err(BusinessError::IllegalSupervisor { supervisor_id }.into());
            }
        }
        Ok(())
    }

    /// Walk the supervisor chain starting at the new supervisor; reaching
    /// the employee being modified means the assignment closes a cycle
    fn check_supervisor_cycle(
        &self,
        employee_id: i64,
        new_supervisor_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        let mut chain = Vec::new();
        let mut current = new_supervisor_id;
        while let Some(supervisor_id) = current {
            let Some(record) = self.employees.get(&supervisor_id) else {
                break;
            };
            chain.push(NamedEntity::from(record));
            if supervisor_id == employee_id {
                return Err(BusinessError::SupervisorCycle {
                    employee_id,
                    supervisors: chain,
                }
                .into());
            }
            if chain.len() > self.employees.len() {
                break;
            }
            current = record.supervisor_id;
        }
        Ok(())
    }

    fn filtered_departments(&self, name: Option<&str>) -> Vec<DepartmentRecord> {
        let needle = name.map(str::to_lowercase);
        self.departments
            .values()
            .filter(|record| {
                needle
                    .as_deref()
                    .is_none_or(|needle| record.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect()
    }

    fn filtered_employees(&self, criteria: Option<&EmployeeCriteria>) -> Vec<EmployeeRecord> {
        self.employees
            .values()
            .filter(|record| matches_criteria(record, criteria))
            .cloned()
            .collect()
    }

    fn department_name(&self, department_id: i64) -> &str {
        self.departments
            .get(&department_id)
            .map(|record| record.name.as_str())
            .unwrap_or_default()
    }
}

fn matches_criteria(record: &EmployeeRecord, criteria: Option<&EmployeeCriteria>) -> bool {
    let Some(criteria) = criteria else {
        return true;
    };
    if let Some(name) = &criteria.name {
        if !record.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if let Some(gender) = criteria.gender {
        if record.gender != gender {
            return false;
        }
    }
    if let Some(min_salary) = criteria.min_salary {
        if record.salary < min_salary {
            return false;
        }
    }
    if let Some(max_salary) = criteria.max_salary {
        if record.salary > max_salary {
            return false;
        }
    }
    true
}

fn sort_departments(
    records: &mut [DepartmentRecord],
    sorted_type: DepartmentSortedType,
    descending: bool,
) {
    match sorted_type {
        DepartmentSortedType::Id => records.sort_by_key(|record| record.id),
        DepartmentSortedType::Name => {
            records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
        }
    }
    if descending {
        records.reverse();
    }
}

/// Slice out the limit/offset window after filter and sort
fn window<T>(records: Vec<T>, limit: Option<u64>, offset: Option<u64>) -> Vec<T> {
    let skipped = records.into_iter().skip(offset.unwrap_or(0) as usize);
    match limit {
        Some(limit) => skipped.take(limit as usize).collect(),
        None => skipped.collect(),
    }
}

#[async_trait]
impl OrgService for InMemoryOrgStore {
    async fn department_count(&self, name: Option<&str>) -> Result<u64, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.filtered_departments(name).len() as u64)
    }

    async fn departments(
        &self,
        name: Option<&str>,
        sorted_type: DepartmentSortedType,
        descending: bool,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<DepartmentRecord>, ServiceError> {
        let inner = self.inner.read().await;
        let mut records = inner.filtered_departments(name);
        sort_departments(&mut records, sorted_type, descending);
        Ok(window(records, limit, offset))
    }

    async fn department(&self, id: i64) -> Result<Option<DepartmentRecord>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.departments.get(&id).cloned())
    }

    async fn average_salary(&self, department_id: i64) -> Result<Option<f64>, ServiceError> {
        let inner = self.inner.read().await;
        let employees = inner.employees_of(department_id);
        if employees.is_empty() {
            return Ok(None);
        }
        let total: i64 = employees.iter().map(|record| record.salary).sum();
        Ok(Some(total as f64 / employees.len() as f64))
    }

    async fn employees_of_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<EmployeeRecord>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.employees_of(department_id))
    }

    async fn create_department(&self, input: DepartmentInput) -> Result<i64, ServiceError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        let id = inner.insert_department(input.name.trim());
        tracing::debug!(id, "created department");
        Ok(id)
    }

    async fn modify_department(
        &self,
        id: i64,
        input: DepartmentInput,
    ) -> Result<bool, ServiceError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        match inner.departments.get_mut(&id) {
            Some(record) => {
                record.name = input.name.trim().to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_department(&self, id: i64) -> Result<bool, ServiceError> {
        let mut inner = self.inner.write().await;
        if !inner.departments.contains_key(&id) {
            return Ok(false);
        }
        let employees = inner.employees_of(id);
        if !employees.is_empty() {
            return Err(BusinessError::CannotDeleteDepartmentWithEmployees {
                department_id: id,
                employees: employees.iter().map(NamedEntity::from).collect(),
            }
            .into());
        }
        inner.departments.remove(&id);
        tracing::debug!(id, "deleted department");
        Ok(true)
    }

    async fn employee_count(
        &self,
        criteria: Option<&EmployeeCriteria>,
    ) -> Result<u64, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.filtered_employees(criteria).len() as u64)
    }

    async fn employees(
        &self,
        criteria: Option<&EmployeeCriteria>,
        sorted_type: EmployeeSortedType,
        descending: bool,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<EmployeeRecord>, ServiceError> {
        let inner = self.inner.read().await;
        let mut records = inner.filtered_employees(criteria);
        match sorted_type {
            EmployeeSortedType::Id => records.sort_by_key(|record| record.id),
            EmployeeSortedType::Name => {
                records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
            }
            EmployeeSortedType::Salary => {
                records.sort_by(|a, b| a.salary.cmp(&b.salary).then(a.id.cmp(&b.id)))
            }
            EmployeeSortedType::Department => records.sort_by(|a, b| {
                a.department_id
                    .cmp(&b.department_id)
                    .then(a.id.cmp(&b.id))
            }),
            EmployeeSortedType::DepartmentName => records.sort_by(|a, b| {
                inner
                    .department_name(a.department_id)
                    .cmp(inner.department_name(b.department_id))
                    .then(a.id.cmp(&b.id))
            }),
        }
        if descending {
            records.reverse();
        }
        Ok(window(records, limit, offset))
    }

    async fn employee(&self, id: i64) -> Result<Option<EmployeeRecord>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.employees.get(&id).cloned())
    }

    async fn subordinates_of(&self, employee_id: i64) -> Result<Vec<EmployeeRecord>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.subordinates_of(employee_id))
    }

    async fn create_employee(&self, input: EmployeeInput) -> Result<i64, ServiceError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        inner.check_references(&input)?;
        let id = inner.insert_employee(
            input.name.trim(),
            input.gender,
            input.salary,
            input.department_id,
            input.supervisor_id,
        );
        tracing::debug!(id, "created employee");
        Ok(id)
    }

    async fn modify_employee(&self, id: i64, input: EmployeeInput) -> Result<bool, ServiceError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        if !inner.employees.contains_key(&id) {
            return Ok(false);
        }
        inner.check_references(&input)?;
        inner.check_supervisor_cycle(id, input.supervisor_id)?;
        if let Some(record) = inner.employees.get_mut(&id) {
            record.name = input.name.trim().to_string();
            record.gender = input.gender;
            record.salary = input.salary;
            record.department_id = input.department_id;
            record.supervisor_id = input.supervisor_id;
        }
        Ok(true)
    }

    async fn delete_employee(&self, id: i64) -> Result<bool, ServiceError> {
        let mut inner = self.inner.write().await;
        if !inner.employees.contains_key(&id) {
            return Ok(false);
        }
        let subordinates = inner.subordinates_of(id);
        if !subordinates.is_empty() {
            return Err(BusinessError::CannotDeleteEmployeeWithSubordinates {
                employee_id: id,
                subordinates: subordinates.iter().map(NamedEntity::from).collect(),
            }
            .into());
        }
        inner.employees.remove(&id);
        tracing::debug!(id, "deleted employee");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_input(department_id: i64, supervisor_id: Option<i64>) -> EmployeeInput {
        EmployeeInput {
            name: "Test".to_string(),
            gender: Gender::Male,
            salary: 1000,
            department_id,
            supervisor_id,
        }
    }

    #[tokio::test]
    async fn test_create_employee_rejects_unknown_department() {
        let store = InMemoryOrgStore::new();
        let result = store.create_employee(employee_input(42, None)).await;
        assert!(matches!(
            result,
            Err(ServiceError::Business(BusinessError::IllegalDepartment {
                department_id: 42
            }))
        ));
    }

    #[tokio::test]
    async fn test_modify_employee_detects_cycle() {
        let store = InMemoryOrgStore::sample();
        // Jim (1) supervises Kate (2); making Kate Jim's supervisor closes
        // the loop
        let input = EmployeeInput {
            name: "Jim".to_string(),
            gender: Gender::Male,
            salary: 10000,
            department_id: 1,
            supervisor_id: Some(2),
        };
        let result = store.modify_employee(1, input).await;
        match result {
            Err(ServiceError::Business(BusinessError::SupervisorCycle {
                employee_id,
                supervisors,
            })) => {
                assert_eq!(employee_id, 1);
                let names: Vec<&str> = supervisors.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["Kate", "Jim"]);
            }
            other => panic!("expected supervisor cycle, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_self_supervision_is_a_cycle() {
        let store = InMemoryOrgStore::sample();
        let input = EmployeeInput {
            supervisor_id: Some(1),
            ..employee_input(1, Some(1))
        };
        let result = store.modify_employee(1, input).await;
        assert!(matches!(
            result,
            Err(ServiceError::Business(BusinessError::SupervisorCycle { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_department_with_employees_is_rejected() {
        let store = InMemoryOrgStore::sample();
        let result = store.delete_department(1).await;
        match result {
            Err(ServiceError::Business(BusinessError::CannotDeleteDepartmentWithEmployees {
                department_id,
                employees,
            })) => {
                assert_eq!(department_id, 1);
                assert_eq!(employees.len(), 3);
            }
            other => panic!("expected business error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_delete_employee_without_subordinates_succeeds() {
        let store = InMemoryOrgStore::sample();
        // Tom (5) has no subordinates
        assert!(store.delete_employee(5).await.unwrap());
        assert_eq!(store.employee(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive_substring() {
        let store = InMemoryOrgStore::sample();
        assert_eq!(store.department_count(Some("MARK")).await.unwrap(), 1);
        assert_eq!(store.department_count(Some("e")).await.unwrap(), 2);
        assert_eq!(store.department_count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_employee_sort_by_salary_descending_with_window() {
        let store = InMemoryOrgStore::sample();
        let records = store
            .employees(None, EmployeeSortedType::Salary, true, Some(2), Some(1))
            .await
            .unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        // Full order: Jim 10000, Linda 9000, Kate 8000, Bob 7000, Tom 6000
        assert_eq!(names, vec!["Linda", "Kate"]);
    }

    #[tokio::test]
    async fn test_salary_criteria_bounds_are_inclusive() {
        let store = InMemoryOrgStore::sample();
        let criteria = EmployeeCriteria {
            min_salary: Some(8000),
            max_salary: Some(9000),
            ..Default::default()
        };
        assert_eq!(store.employee_count(Some(&criteria)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_average_salary_of_empty_department_is_null() {
        let store = InMemoryOrgStore::new();
        let id = store
            .create_department(DepartmentInput::new("Empty"))
            .await
            .unwrap();
        assert_eq!(store.average_salary(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_modify_unknown_ids_return_false() {
        let store = InMemoryOrgStore::new();
        assert!(
            !store
                .modify_department(9, DepartmentInput::new("X"))
                .await
                .unwrap()
        );
        assert!(!store.delete_department(9).await.unwrap());
        assert!(!store.delete_employee(9).await.unwrap());
    }
}
