//! Listing, filter and ordering integration tests.

use chrono::{Duration, Utc};
use directory_server::db::DbService;
use directory_server::db::models::{Department, EmployeeCreate, EmploymentCountry, IdType};
use directory_server::db::repository::{
    EmployeeFilter, EmployeeRepository, parse_ordering,
};

async fn seeded_repo() -> EmployeeRepository {
    let db = DbService::memory().await.expect("in-memory database");
    let repo = EmployeeRepository::new(db.db);
    let today = Utc::now().date_naive();

    let staff = [
        ("Ana", None, "Gomez", "Perez", EmploymentCountry::Co, IdType::Cc, "100", 0, Department::Adm),
        ("Luis", None, "Martinez", "Rojas", EmploymentCountry::Us, IdType::Pa, "200", 5, Department::Inf),
        ("Carmen", Some("Elena"), "De La Cruz", "Diaz", EmploymentCountry::Co, IdType::Ce, "300", 10, Department::Th),
    ];

    for (first, other, surname, second, country, id_type, id_number, days_ago, department) in staff
    {
        repo.create(EmployeeCreate {
            first_name: first.to_string(),
            other_names: other.map(str::to_string),
            first_surname: surname.to_string(),
            second_surname: second.to_string(),
            employment_country: country,
            id_type,
            id_number: id_number.to_string(),
            hire_date: today - Duration::days(days_ago),
            department,
        })
        .await
        .expect("seed employee");
    }

    repo
}

fn surnames(employees: &[directory_server::db::models::Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.first_surname.as_str()).collect()
}

#[tokio::test]
async fn contains_filters_are_case_insensitive() {
    let repo = seeded_repo().await;

    let by_surname = repo
        .find_all(
            EmployeeFilter {
                first_surname: Some("gom".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(surnames(&by_surname), ["GOMEZ"]);

    let by_email = repo
        .find_all(
            EmployeeFilter {
                email: Some("MARTINEZ".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].email, "luis.martinez@cidenet.com.us");

    let by_other_names = repo
        .find_all(
            EmployeeFilter {
                other_names: Some("ele".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(surnames(&by_other_names), ["DE LA CRUZ"]);
}

#[tokio::test]
async fn exact_filters_match_whole_values() {
    let repo = seeded_repo().await;

    let by_id_type = repo
        .find_all(
            EmployeeFilter {
                id_type: Some(IdType::Cc),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(surnames(&by_id_type), ["GOMEZ"]);

    let by_country = repo
        .find_all(
            EmployeeFilter {
                employment_country: Some(EmploymentCountry::Co),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(by_country.len(), 2);

    let by_department = repo
        .find_all(
            EmployeeFilter {
                department: Some(Department::Th),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(surnames(&by_department), ["DE LA CRUZ"]);
}

#[tokio::test]
async fn status_filter_matches_exactly() {
    let repo = seeded_repo().await;

    let active = repo
        .find_all(
            EmployeeFilter {
                status: Some("Active".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(active.len(), 3);

    let inactive = repo
        .find_all(
            EmployeeFilter {
                status: Some("Inactive".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert!(inactive.is_empty());
}

#[tokio::test]
async fn filters_combine_with_and_semantics() {
    let repo = seeded_repo().await;

    let employees = repo
        .find_all(
            EmployeeFilter {
                employment_country: Some(EmploymentCountry::Co),
                first_name: Some("an".to_string()),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(surnames(&employees), ["GOMEZ"]);
}

#[tokio::test]
async fn default_ordering_is_surname_then_first_name() {
    let repo = seeded_repo().await;

    let employees = repo.find_all(Default::default(), &[]).await.unwrap();
    assert_eq!(surnames(&employees), ["DE LA CRUZ", "GOMEZ", "MARTINEZ"]);
}

#[tokio::test]
async fn explicit_descending_ordering() {
    let repo = seeded_repo().await;

    let ordering = parse_ordering("-first_surname").unwrap();
    let employees = repo.find_all(Default::default(), &ordering).await.unwrap();
    assert_eq!(surnames(&employees), ["MARTINEZ", "GOMEZ", "DE LA CRUZ"]);
}

#[tokio::test]
async fn ordering_by_hire_date() {
    let repo = seeded_repo().await;

    let ordering = parse_ordering("hire_date").unwrap();
    let employees = repo.find_all(Default::default(), &ordering).await.unwrap();
    // oldest hire first
    assert_eq!(surnames(&employees), ["DE LA CRUZ", "MARTINEZ", "GOMEZ"]);
}
