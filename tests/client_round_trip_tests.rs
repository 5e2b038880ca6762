//! End-to-end tests driving the client against the in-process backend
//!
//! These tests verify the complete flow from client operation to decoded
//! result: document construction, execution, projection through the
//! requested selection set, paging arithmetic, and the business-error
//! round trip.

use orgql::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Honor RUST_LOG in test runs; repeated calls are a no-op
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Test Executors
// =============================================================================

/// Delegating executor that counts how many requests go through it
struct CountingExecutor {
    inner: InProcessExecutor,
    calls: AtomicUsize,
}

impl CountingExecutor {
    fn sample() -> Self {
        init_tracing();
        Self {
            inner: InProcessExecutor::new(Arc::new(InMemoryOrgStore::sample())),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphQLExecutor for CountingExecutor {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, OrgqlError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request).await
    }
}

fn sample_client() -> OrgClient<InProcessExecutor> {
    init_tracing();
    OrgClient::new(InProcessExecutor::new(Arc::new(InMemoryOrgStore::sample())))
}

// =============================================================================
// Dynamic Selection
// =============================================================================

#[tokio::test]
async fn test_department_page_carries_selected_fields_only() {
    let client = sample_client();
    let specification = DepartmentSpecification {
        graphql_paths: vec![
            "name".into(),
            "avgSalary".into(),
            "employees.name".into(),
            "employees.supervisor.name".into(),
        ],
        ..Default::default()
    };

    let page = client.find_departments(&specification, 1).await.unwrap();
    assert_eq!(page.row_count, 2);
    assert_eq!(page.page_count, 1);

    let develop = &page.entities[0];
    assert_eq!(develop.name.as_deref(), Some("Develop"));
    // id was not selected
    assert_eq!(develop.id, None);
    assert_eq!(develop.avg_salary, Some(25000.0 / 3.0));

    let employees = develop.employees.as_ref().unwrap();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees[0].name.as_deref(), Some("Jim"));
    // Jim has no supervisor; Kate reports to Jim
    assert_eq!(employees[0].supervisor, None);
    assert_eq!(
        employees[1].supervisor.as_ref().unwrap().name.as_deref(),
        Some("Jim")
    );
}

#[tokio::test]
async fn test_empty_selection_yields_entities_with_no_fields() {
    let client = sample_client();
    let specification = DepartmentSpecification::default();

    let page = client.find_departments(&specification, 1).await.unwrap();
    assert_eq!(page.row_count, 2);
    // Only the placeholder was requested, so every view field is None
    assert_eq!(page.entities[0], Department::default());
}

#[tokio::test]
async fn test_employee_listing_filters_and_sorts() {
    let client = sample_client();
    let specification = EmployeeSpecification {
        criteria: Some(EmployeeCriteria {
            gender: Some(Gender::Female),
            ..Default::default()
        }),
        sorted_type: EmployeeSortedType::Salary,
        descending: true,
        graphql_paths: vec!["name".into(), "salary".into()],
    };

    let page = client.find_employees(&specification, 1).await.unwrap();
    let names: Vec<&str> = page
        .entities
        .iter()
        .filter_map(|employee| employee.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Linda", "Kate"]);
    assert_eq!(page.entities[0].salary, Some(9000));
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_out_of_range_page_is_clamped() {
    let store = InMemoryOrgStore::sample();
    let config = ClientConfig {
        page_size: 2,
        ..Default::default()
    };
    let client = OrgClient::with_config(InProcessExecutor::new(Arc::new(store)), config);
    let specification = EmployeeSpecification {
        graphql_paths: vec!["id".into(), "name".into()],
        ..Default::default()
    };

    // Five employees, two per page: asking for page 9 lands on page 3
    let page = client.find_employees(&specification, 9).await.unwrap();
    assert_eq!(page.page_count, 3);
    assert_eq!(page.page_no, 3);
    assert_eq!(page.entities.len(), 1);
    assert_eq!(page.entities[0].name.as_deref(), Some("Tom"));
    assert!(page.has_prev());
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_empty_result_skips_the_list_query() {
    let client = OrgClient::new(CountingExecutor::sample());
    let specification = DepartmentSpecification {
        name: Some("no such department".into()),
        graphql_paths: vec!["id".into()],
        ..Default::default()
    };

    let page = client.find_departments(&specification, 1).await.unwrap();
    assert_eq!(page, Page::empty(client.config().page_size));
    // The count query ran; the list query never did
    assert_eq!(client.executor().call_count(), 1);
}

// =============================================================================
// CRUD Round Trips
// =============================================================================

#[tokio::test]
async fn test_department_create_modify_delete() {
    let client = sample_client();

    let id = client
        .create_department(&DepartmentInput::new("Sales"))
        .await
        .unwrap();
    let found = client.find_department(id).await.unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.name.as_deref(), Some("Sales"));

    assert!(
        client
            .modify_department(id, &DepartmentInput::new("Global Sales"))
            .await
            .unwrap()
    );
    let renamed = client.find_department(id).await.unwrap().unwrap();
    assert_eq!(renamed.name.as_deref(), Some("Global Sales"));

    assert!(client.delete_department(id).await.unwrap());
    assert_eq!(client.find_department(id).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_employee_loads_edit_fields() {
    let client = sample_client();

    // Kate: develop department, reports to Jim
    let kate = client.find_employee(2).await.unwrap().unwrap();
    assert_eq!(kate.name.as_deref(), Some("Kate"));
    assert_eq!(kate.gender, Some(Gender::Female));
    assert_eq!(kate.salary, Some(8000));
    assert_eq!(kate.department.as_ref().unwrap().id, Some(1));
    assert_eq!(kate.supervisor.as_ref().unwrap().id, Some(1));

    assert_eq!(client.find_employee(999).await.unwrap(), None);
}

#[tokio::test]
async fn test_modify_unknown_employee_returns_false() {
    let client = sample_client();
    let input = EmployeeInput {
        name: "Ghost".into(),
        gender: Gender::Male,
        salary: 1,
        department_id: 1,
        supervisor_id: None,
    };
    assert!(!client.modify_employee(999, &input).await.unwrap());
    assert!(!client.delete_employee(999).await.unwrap());
}

// =============================================================================
// Business Errors
// =============================================================================

#[tokio::test]
async fn test_delete_department_with_employees_is_a_business_error() {
    let client = sample_client();
    match client.delete_department(1).await {
        Err(OrgqlError::Business(BusinessError::CannotDeleteDepartmentWithEmployees {
            department_id,
            employees,
        })) => {
            assert_eq!(department_id, 1);
            let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["Jim", "Kate", "Bob"]);
        }
        other => panic!("expected business error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_supervisor_cycle_reports_the_chain() {
    let client = sample_client();
    // Jim supervises Kate; making Kate Jim's supervisor closes the loop
    let input = EmployeeInput {
        name: "Jim".into(),
        gender: Gender::Male,
        salary: 10000,
        department_id: 1,
        supervisor_id: Some(2),
    };
    match client.modify_employee(1, &input).await {
        Err(OrgqlError::Business(BusinessError::SupervisorCycle {
            employee_id,
            supervisors,
        })) => {
            assert_eq!(employee_id, 1);
            assert_eq!(supervisors.len(), 2);
        }
        other => panic!("expected supervisor cycle, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_employee_with_unknown_department_is_rejected() {
    let client = sample_client();
    let input = EmployeeInput {
        name: "Nobody".into(),
        gender: Gender::Female,
        salary: 5000,
        department_id: 42,
        supervisor_id: None,
    };
    assert!(matches!(
        client.create_employee(&input).await,
        Err(OrgqlError::Business(BusinessError::IllegalDepartment {
            department_id: 42
        }))
    ));
}

// =============================================================================
// Non-Business Failures
// =============================================================================

#[tokio::test]
async fn test_validation_failure_surfaces_as_graphql_error() {
    let client = sample_client();
    let result = client.create_department(&DepartmentInput::new("   ")).await;
    assert!(matches!(result, Err(OrgqlError::GraphQL(_))));
}

#[tokio::test]
async fn test_malformed_selection_path_fails_before_sending() {
    let client = sample_client();
    let specification = DepartmentSpecification {
        graphql_paths: vec!["employees..name".into()],
        ..Default::default()
    };
    assert!(matches!(
        client.find_departments(&specification, 1).await,
        Err(OrgqlError::Document(_))
    ));
}
