//! Employee Repository
//!
//! Save state machine: create runs Normalize -> Validate -> GenerateEmail
//! -> persist; update runs Normalize -> Validate -> persist and never
//! touches email, status or created_at.

use super::{BaseRepository, RepoError, RepoResult, UniqueIndex};
use crate::db::models::employee::{MAX_EMAIL_PROBES, email_candidate};
use crate::db::models::{
    Department, Employee, EmployeeCreate, EmployeeUpdate, EmploymentCountry, IdType,
};
use crate::utils::{FieldError, time};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "employee";

/// Filter set for employee listings
///
/// Name, id-number and email filters match as case-insensitive substrings;
/// the enum-valued fields and status match exactly.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub first_name: Option<String>,
    pub other_names: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub id_type: Option<IdType>,
    pub employment_country: Option<EmploymentCountry>,
    pub department: Option<Department>,
    pub status: Option<String>,
}

/// Sortable columns for employee listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    FirstSurname,
    FirstName,
    HireDate,
    CreatedAt,
}

impl OrderField {
    fn column(self) -> &'static str {
        match self {
            OrderField::FirstSurname => "first_surname",
            OrderField::FirstName => "first_name",
            OrderField::HireDate => "hire_date",
            OrderField::CreatedAt => "created_at",
        }
    }
}

/// One ordering term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeOrder {
    pub field: OrderField,
    pub descending: bool,
}

/// Default listing order: surname, then first name
pub fn default_ordering() -> Vec<EmployeeOrder> {
    vec![
        EmployeeOrder {
            field: OrderField::FirstSurname,
            descending: false,
        },
        EmployeeOrder {
            field: OrderField::FirstName,
            descending: false,
        },
    ]
}

/// Parse a comma-separated ordering expression
///
/// A leading `-` selects descending order. Unknown fields are rejected.
pub fn parse_ordering(raw: &str) -> Result<Vec<EmployeeOrder>, FieldError> {
    let mut ordering = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (name, descending) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        let field = match name {
            "first_surname" => OrderField::FirstSurname,
            "first_name" => OrderField::FirstName,
            "hire_date" => OrderField::HireDate,
            "created_at" => OrderField::CreatedAt,
            _ => {
                return Err(FieldError::new(
                    "ordering",
                    format!("cannot order by '{name}'"),
                ));
            }
        };
        ordering.push(EmployeeOrder { field, descending });
    }
    if ordering.is_empty() {
        Ok(default_ordering())
    } else {
        Ok(ordering)
    }
}

fn identity_conflict() -> FieldError {
    FieldError::new(
        "id_number",
        "an employee with this id type and id number already exists",
    )
}

fn parse_employee_id(id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        id.parse::<RecordId>().map_err(|_| {
            RepoError::Validation(vec![FieldError::new(
                "id",
                format!("invalid employee id: {id}"),
            )])
        })
    } else {
        Ok(RecordId::from_table_key(TABLE, id))
    }
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List employees matching `filter`, sorted by `ordering`
    pub async fn find_all(
        &self,
        filter: EmployeeFilter,
        ordering: &[EmployeeOrder],
    ) -> RepoResult<Vec<Employee>> {
        let mut conditions: Vec<&'static str> = Vec::new();

        if filter.first_name.is_some() {
            conditions.push(
                "string::contains(string::lowercase(first_name), string::lowercase($first_name))",
            );
        }
        if filter.other_names.is_some() {
            conditions.push(
                "string::contains(string::lowercase(other_names), string::lowercase($other_names))",
            );
        }
        if filter.first_surname.is_some() {
            conditions.push(
                "string::contains(string::lowercase(first_surname), string::lowercase($first_surname))",
            );
        }
        if filter.second_surname.is_some() {
            conditions.push(
                "string::contains(string::lowercase(second_surname), string::lowercase($second_surname))",
            );
        }
        if filter.id_number.is_some() {
            conditions.push(
                "string::contains(string::lowercase(id_number), string::lowercase($id_number))",
            );
        }
        if filter.email.is_some() {
            conditions
                .push("string::contains(string::lowercase(email), string::lowercase($email))");
        }
        if filter.id_type.is_some() {
            conditions.push("id_type = $id_type");
        }
        if filter.employment_country.is_some() {
            conditions.push("employment_country = $employment_country");
        }
        if filter.department.is_some() {
            conditions.push("department = $department");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }

        let mut sql = String::from("SELECT * FROM employee");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let ordering = if ordering.is_empty() {
            default_ordering()
        } else {
            ordering.to_vec()
        };
        let order_terms: Vec<String> = ordering
            .iter()
            .map(|o| {
                format!(
                    "{} {}",
                    o.field.column(),
                    if o.descending { "DESC" } else { "ASC" }
                )
            })
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&order_terms.join(", "));

        let mut query = self.base.db().query(sql);
        if let Some(v) = filter.first_name {
            query = query.bind(("first_name", v));
        }
        if let Some(v) = filter.other_names {
            query = query.bind(("other_names", v));
        }
        if let Some(v) = filter.first_surname {
            query = query.bind(("first_surname", v));
        }
        if let Some(v) = filter.second_surname {
            query = query.bind(("second_surname", v));
        }
        if let Some(v) = filter.id_number {
            query = query.bind(("id_number", v));
        }
        if let Some(v) = filter.email {
            query = query.bind(("email", v));
        }
        if let Some(v) = filter.id_type {
            query = query.bind(("id_type", v));
        }
        if let Some(v) = filter.employment_country {
            query = query.bind(("employment_country", v));
        }
        if let Some(v) = filter.department {
            query = query.bind(("department", v));
        }
        if let Some(v) = filter.status {
            query = query.bind(("status", v));
        }

        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let record_id = parse_employee_id(id)?;
        let employee: Option<Employee> = self.base.db().select(record_id).await?;
        Ok(employee)
    }

    /// Create a new employee
    ///
    /// Normalize -> Validate -> identity check -> assign the first free
    /// email candidate -> persist. Runs no partial writes: validation
    /// completes before any insert attempt.
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let mut draft = Employee::from_create(data, time::now_millis());
        draft.normalize();
        draft.validate(time::today()).map_err(RepoError::Validation)?;

        if self
            .identity_taken(draft.id_type, &draft.id_number, None)
            .await?
        {
            return Err(RepoError::Validation(vec![identity_conflict()]));
        }

        let local_part = draft.email_local_part();
        let domain = draft.employment_country.email_domain();

        // Probe candidates until one survives the unique index. The
        // existence check only skips known collisions; the index is the
        // real arbiter, so a lost insert race advances the counter too.
        for attempt in 0..=MAX_EMAIL_PROBES {
            let candidate = email_candidate(&local_part, domain, attempt);
            if self.email_taken(&candidate).await? {
                continue;
            }
            draft.email = candidate;
            match self.insert(&draft).await {
                Ok(Some(created)) => return Ok(created),
                Ok(None) => {
                    return Err(RepoError::Database(
                        "employee create returned no record".to_string(),
                    ));
                }
                Err(err) => match UniqueIndex::from_error(&err) {
                    Some(UniqueIndex::Email) => continue,
                    Some(UniqueIndex::Identity) => {
                        return Err(RepoError::Validation(vec![identity_conflict()]));
                    }
                    None => return Err(err.into()),
                },
            }
        }

        Err(RepoError::EmailExhausted)
    }

    /// Update an employee
    ///
    /// The merged record is re-normalized and re-validated; email, status
    /// and created_at are absent from the SET list and cannot change.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let record_id = parse_employee_id(id)?;
        let mut employee = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        employee.apply_update(data, time::now_millis());
        employee.normalize();
        employee
            .validate(time::today())
            .map_err(RepoError::Validation)?;

        if self
            .identity_taken(
                employee.id_type,
                &employee.id_number,
                Some(record_id.clone()),
            )
            .await?
        {
            return Err(RepoError::Validation(vec![identity_conflict()]));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $record SET
                    first_name = $first_name,
                    other_names = $other_names,
                    first_surname = $first_surname,
                    second_surname = $second_surname,
                    employment_country = $employment_country,
                    id_type = $id_type,
                    id_number = $id_number,
                    hire_date = $hire_date,
                    department = $department,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("record", record_id))
            .bind(("first_name", employee.first_name.clone()))
            .bind(("other_names", employee.other_names.clone()))
            .bind(("first_surname", employee.first_surname.clone()))
            .bind(("second_surname", employee.second_surname.clone()))
            .bind(("employment_country", employee.employment_country))
            .bind(("id_type", employee.id_type))
            .bind(("id_number", employee.id_number.clone()))
            .bind(("hire_date", employee.hire_date))
            .bind(("department", employee.department))
            .bind(("updated_at", employee.updated_at))
            .await?;

        match result.take::<Option<Employee>>(0) {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => Err(RepoError::NotFound(format!("Employee {} not found", id))),
            Err(err) => match UniqueIndex::from_error(&err) {
                Some(UniqueIndex::Identity) => {
                    Err(RepoError::Validation(vec![identity_conflict()]))
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Hard delete an employee
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_employee_id(id)?;
        let existing: Option<Employee> = self.base.db().select(record_id.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Employee {} not found", id)));
        }

        let _: Option<Employee> = self.base.db().delete(record_id).await?;
        Ok(true)
    }

    async fn insert(&self, employee: &Employee) -> Result<Option<Employee>, surrealdb::Error> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    first_name = $first_name,
                    other_names = $other_names,
                    first_surname = $first_surname,
                    second_surname = $second_surname,
                    employment_country = $employment_country,
                    id_type = $id_type,
                    id_number = $id_number,
                    email = $email,
                    hire_date = $hire_date,
                    department = $department,
                    status = $status,
                    created_at = $created_at,
                    updated_at = NONE
                RETURN AFTER"#,
            )
            .bind(("first_name", employee.first_name.clone()))
            .bind(("other_names", employee.other_names.clone()))
            .bind(("first_surname", employee.first_surname.clone()))
            .bind(("second_surname", employee.second_surname.clone()))
            .bind(("employment_country", employee.employment_country))
            .bind(("id_type", employee.id_type))
            .bind(("id_number", employee.id_number.clone()))
            .bind(("email", employee.email.clone()))
            .bind(("hire_date", employee.hire_date))
            .bind(("department", employee.department))
            .bind(("status", employee.status.clone()))
            .bind(("created_at", employee.created_at))
            .await?;
        result.take(0)
    }

    async fn email_taken(&self, email: &str) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let hits: Vec<Employee> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    async fn identity_taken(
        &self,
        id_type: IdType,
        id_number: &str,
        exclude: Option<RecordId>,
    ) -> RepoResult<bool> {
        let sql = if exclude.is_some() {
            "SELECT * FROM employee WHERE id_type = $id_type AND id_number = $id_number AND id != $exclude"
        } else {
            "SELECT * FROM employee WHERE id_type = $id_type AND id_number = $id_number"
        };
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("id_type", id_type))
            .bind(("id_number", id_number.to_string()));
        if let Some(record_id) = exclude {
            query = query.bind(("exclude", record_id));
        }
        let hits: Vec<Employee> = query.await?.take(0)?;
        Ok(!hits.is_empty())
    }
}
