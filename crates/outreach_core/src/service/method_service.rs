//! Communication method catalog use-case service.
//!
//! # Responsibility
//! - Validate method writes against the owning company's existing ladder.
//! - Install the predefined method ladder on request.
//!
//! # Invariants
//! - A sequence rank is never shared by two methods of one company; violations
//!   are rejected here with `InvalidConfiguration` before reaching storage.
//! - A method never changes owning company.

use crate::cadence::ConfigurationIssue;
use crate::model::company::CompanyId;
use crate::model::method::{predefined_methods, CommunicationMethod, MethodId};
use crate::repo::company_repo::CompanyRepository;
use crate::repo::method_repo::MethodRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Catalog service over a company registry and a method repository.
pub struct MethodService<C: CompanyRepository, M: MethodRepository> {
    companies: C,
    methods: M,
}

impl<C: CompanyRepository, M: MethodRepository> MethodService<C, M> {
    pub fn new(companies: C, methods: M) -> Self {
        Self { companies, methods }
    }

    /// Adds one method to a company's ladder.
    ///
    /// # Errors
    /// - `Validation` for blank names or sequences outside `1..=5`.
    /// - `NotFound` when the owning company does not exist.
    /// - `InvalidConfiguration` when the sequence is already taken.
    pub fn create_method(
        &self,
        method: &CommunicationMethod,
    ) -> ServiceResult<CommunicationMethod> {
        method.validate()?;
        self.ensure_company_exists(method.company_id)?;
        self.ensure_sequence_free(method)?;

        let id = self.methods.create_method(method)?;
        info!(
            "event=method_create module=catalog status=ok company_id={} method_id={id} sequence={}",
            method.company_id, method.sequence
        );
        self.get_method(id)
    }

    /// Rewrites sequence, mandatory flag, name and description.
    ///
    /// Keeping a method at its own current sequence is not a collision.
    ///
    /// # Errors
    /// - `MethodOwnerChanged` when `company_id` differs from the stored owner.
    pub fn update_method(
        &self,
        method: &CommunicationMethod,
    ) -> ServiceResult<CommunicationMethod> {
        method.validate()?;
        let existing = self.get_method(method.id)?;
        if existing.company_id != method.company_id {
            return Err(ServiceError::MethodOwnerChanged(method.id));
        }
        self.ensure_sequence_free(method)?;

        self.methods.update_method(method)?;
        info!(
            "event=method_update module=catalog status=ok company_id={} method_id={} sequence={}",
            method.company_id, method.id, method.sequence
        );
        self.get_method(method.id)
    }

    pub fn get_method(&self, id: MethodId) -> ServiceResult<CommunicationMethod> {
        self.methods
            .get_method(id)?
            .ok_or_else(|| ServiceError::not_found("communication method", id))
    }

    /// Lists one company's methods in escalation order.
    pub fn list_methods(&self, company_id: CompanyId) -> ServiceResult<Vec<CommunicationMethod>> {
        self.ensure_company_exists(company_id)?;
        Ok(self.methods.list_methods(company_id)?)
    }

    pub fn list_all_methods(&self) -> ServiceResult<Vec<CommunicationMethod>> {
        Ok(self.methods.list_all_methods()?)
    }

    /// Deletes a method that has no logged communications.
    pub fn delete_method(&self, id: MethodId) -> ServiceResult<()> {
        self.methods.delete_method(id)?;
        info!("event=method_delete module=catalog status=ok method_id={id}");
        Ok(())
    }

    /// Installs the predefined ladder (LinkedIn Post .. Other) for a company.
    ///
    /// All five methods are inserted atomically.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if any predefined rank is already occupied;
    ///   nothing is written in that case.
    pub fn seed_default_methods(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<CommunicationMethod>> {
        self.ensure_company_exists(company_id)?;
        let ladder = predefined_methods(company_id);
        for method in &ladder {
            self.ensure_sequence_free(method)?;
        }

        self.methods.create_methods(&ladder)?;
        info!(
            "event=method_seed module=catalog status=ok company_id={company_id} count={}",
            ladder.len()
        );
        Ok(self.methods.list_methods(company_id)?)
    }

    fn ensure_company_exists(&self, company_id: CompanyId) -> ServiceResult<()> {
        match self.companies.get_company(company_id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("company", company_id)),
        }
    }

    fn ensure_sequence_free(&self, candidate: &CommunicationMethod) -> ServiceResult<()> {
        let taken_by = self
            .methods
            .list_methods(candidate.company_id)?
            .into_iter()
            .find(|method| method.sequence == candidate.sequence && method.id != candidate.id);

        match taken_by {
            None => Ok(()),
            Some(existing) => {
                warn!(
                    "event=method_write module=catalog status=rejected error_code=duplicate_sequence company_id={} sequence={}",
                    candidate.company_id, candidate.sequence
                );
                Err(ServiceError::InvalidConfiguration(
                    ConfigurationIssue::DuplicateSequence {
                        sequence: candidate.sequence,
                        existing: existing.id,
                        conflicting: candidate.id,
                    },
                ))
            }
        }
    }
}
