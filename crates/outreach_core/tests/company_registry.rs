use outreach_core::db::open_db_in_memory;
use outreach_core::model::company::{parse_contact_list, CompanyValidationError};
use outreach_core::model::method::CommunicationMethod;
use outreach_core::{
    Company, CompanyRepository, CompanyService, MethodRepository, RepoError, ServiceError,
    SqliteCompanyRepository, SqliteMethodRepository, ValidationError,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip_preserves_contact_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    let mut company = Company::new("Acme Corp", 14);
    company.location = "Berlin".to_string();
    company.linkedin = "https://www.linkedin.com/company/acme".to_string();
    company.emails = parse_contact_list("sales@acme.io; ceo@acme.io");
    company.phone_numbers = parse_contact_list("+49 30 1234, +49 30 5678");
    company.comments = "met at the trade fair".to_string();

    let stored = service.create_company(&company).unwrap();
    assert_eq!(stored, company);
    assert_eq!(stored.emails, vec!["sales@acme.io", "ceo@acme.io"]);
    assert_eq!(service.get_company(company.id).unwrap(), company);
}

#[test]
fn list_companies_orders_by_name_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    for name in ["zeta", "Alpha", "beta"] {
        service.create_company(&Company::new(name, 7)).unwrap();
    }

    let names: Vec<String> = service
        .list_companies()
        .unwrap()
        .into_iter()
        .map(|company| company.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
}

#[test]
fn update_company_replaces_fields_and_rejects_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    let mut company = service.create_company(&Company::new("Acme", 7)).unwrap();
    company.periodicity_days = 30;
    company.comments = "quarterly review".to_string();
    let updated = service.update_company(&company).unwrap();
    assert_eq!(updated.periodicity_days, 30);
    assert_eq!(updated.comments, "quarterly review");

    let ghost = Company::new("Ghost", 7);
    let err = service.update_company(&ghost).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: "company", id } if id == ghost.id
    ));
}

#[test]
fn validation_blocks_zero_periodicity_and_blank_names() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    let err = service.create_company(&Company::new("Acme", 0)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Company(
            CompanyValidationError::ZeroPeriodicity
        ))
    ));

    let err = service.create_company(&Company::new("   ", 7)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Company(CompanyValidationError::BlankName))
    ));
    assert!(service.list_companies().unwrap().is_empty());
}

#[test]
fn get_unknown_company_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    let id = Uuid::new_v4();
    let err = service.get_company(id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: missing, .. } if missing == id));
}

#[test]
fn delete_company_with_methods_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let companies = SqliteCompanyRepository::try_new(&conn).unwrap();
    let methods = SqliteMethodRepository::try_new(&conn).unwrap();

    let company = Company::new("Acme", 7);
    companies.create_company(&company).unwrap();
    methods
        .create_method(&CommunicationMethod::new(company.id, 1, "Email", true))
        .unwrap();

    let err = companies.delete_company(company.id).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert!(companies.get_company(company.id).unwrap().is_some());
}

#[test]
fn delete_company_removes_empty_company() {
    let conn = open_db_in_memory().unwrap();
    let service = CompanyService::new(SqliteCompanyRepository::try_new(&conn).unwrap());

    let company = service.create_company(&Company::new("Acme", 7)).unwrap();
    service.delete_company(company.id).unwrap();

    assert!(service.list_companies().unwrap().is_empty());
    let err = service.delete_company(company.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn company_json_rejects_invalid_periodicity() {
    let id = Uuid::new_v4();
    let valid = format!(r#"{{"id":"{id}","name":"Acme","periodicity_days":7}}"#);
    let company: Company = serde_json::from_str(&valid).unwrap();
    assert_eq!(company.periodicity_days, 7);
    assert!(company.emails.is_empty());

    let invalid = format!(r#"{{"id":"{id}","name":"Acme","periodicity_days":0}}"#);
    assert!(serde_json::from_str::<Company>(&invalid).is_err());
}
