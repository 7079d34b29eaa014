//! Company registry use-case service.
//!
//! # Responsibility
//! - Provide create/read/update/delete entry points for company records.
//! - Read records back after writes so callers see the stored shape.

use crate::model::company::{Company, CompanyId};
use crate::repo::company_repo::CompanyRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Use-case service wrapper for the company registry.
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new company, returning the stored record.
    pub fn create_company(&self, company: &Company) -> ServiceResult<Company> {
        company.validate()?;
        let id = self.repo.create_company(company)?;
        info!("event=company_create module=registry status=ok company_id={id}");
        self.get_company(id)
    }

    /// Loads one company.
    ///
    /// # Errors
    /// - `NotFound` for an unknown id.
    pub fn get_company(&self, id: CompanyId) -> ServiceResult<Company> {
        self.repo
            .get_company(id)?
            .ok_or_else(|| ServiceError::not_found("company", id))
    }

    /// Lists companies ordered by name.
    pub fn list_companies(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.repo.list_companies()?)
    }

    /// Replaces every editable field of an existing company.
    pub fn update_company(&self, company: &Company) -> ServiceResult<Company> {
        company.validate()?;
        self.repo.update_company(company)?;
        info!(
            "event=company_update module=registry status=ok company_id={}",
            company.id
        );
        self.get_company(company.id)
    }

    /// Deletes a company that owns no methods or communications.
    pub fn delete_company(&self, id: CompanyId) -> ServiceResult<()> {
        self.repo.delete_company(id)?;
        info!("event=company_delete module=registry status=ok company_id={id}");
        Ok(())
    }
}
