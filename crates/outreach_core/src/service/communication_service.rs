//! Communication log use-case service.
//!
//! # Responsibility
//! - Record, edit and remove completed communications.
//! - Check that the referenced method is configured for the same company.

use crate::cadence::ConfigurationIssue;
use crate::model::communication::{CommunicationDraft, CommunicationEvent, CommunicationId};
use crate::model::company::CompanyId;
use crate::repo::communication_repo::CommunicationRepository;
use crate::repo::company_repo::CompanyRepository;
use crate::repo::method_repo::MethodRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Communication log service.
pub struct CommunicationService<C, M, L>
where
    C: CompanyRepository,
    M: MethodRepository,
    L: CommunicationRepository,
{
    companies: C,
    methods: M,
    log: L,
}

impl<C, M, L> CommunicationService<C, M, L>
where
    C: CompanyRepository,
    M: MethodRepository,
    L: CommunicationRepository,
{
    pub fn new(companies: C, methods: M, log: L) -> Self {
        Self {
            companies,
            methods,
            log,
        }
    }

    /// Appends one completed communication.
    ///
    /// # Errors
    /// - `NotFound` for an unknown company or method.
    /// - `MethodCompanyMismatch` when the method belongs to another company.
    pub fn log_communication(
        &self,
        draft: &CommunicationDraft,
    ) -> ServiceResult<CommunicationEvent> {
        draft.validate()?;
        self.ensure_company_exists(draft.company_id)?;
        self.ensure_method_matches(draft)?;

        let event = self.log.create_communication(draft)?;
        info!(
            "event=communication_log module=log status=ok company_id={} communication_id={} insertion_seq={}",
            event.company_id, event.id, event.insertion_seq
        );
        Ok(event)
    }

    /// Rewrites method, date and notes of a logged communication.
    ///
    /// The insertion rank is preserved, so editing never reorders same-day
    /// entries.
    pub fn update_communication(
        &self,
        draft: &CommunicationDraft,
    ) -> ServiceResult<CommunicationEvent> {
        draft.validate()?;
        let existing = self.get_communication(draft.id)?;
        if existing.company_id != draft.company_id {
            return Err(ServiceError::InvalidConfiguration(
                ConfigurationIssue::ForeignCommunication(draft.id),
            ));
        }
        self.ensure_method_matches(draft)?;

        self.log.update_communication(draft)?;
        info!(
            "event=communication_update module=log status=ok communication_id={}",
            draft.id
        );
        self.get_communication(draft.id)
    }

    pub fn get_communication(&self, id: CommunicationId) -> ServiceResult<CommunicationEvent> {
        self.log
            .get_communication(id)?
            .ok_or_else(|| ServiceError::not_found("communication", id))
    }

    /// Lists a company's communications, most recent first.
    pub fn list_communications(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<CommunicationEvent>> {
        self.ensure_company_exists(company_id)?;
        Ok(self.log.list_communications(company_id)?)
    }

    pub fn delete_communication(&self, id: CommunicationId) -> ServiceResult<()> {
        self.log.delete_communication(id)?;
        info!("event=communication_delete module=log status=ok communication_id={id}");
        Ok(())
    }

    fn ensure_company_exists(&self, company_id: CompanyId) -> ServiceResult<()> {
        self.companies
            .get_company(company_id)?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("company", company_id))
    }

    fn ensure_method_matches(&self, draft: &CommunicationDraft) -> ServiceResult<()> {
        let method = self
            .methods
            .get_method(draft.method_id)?
            .ok_or_else(|| ServiceError::not_found("communication method", draft.method_id))?;
        if method.company_id != draft.company_id {
            return Err(ServiceError::MethodCompanyMismatch {
                method_id: method.id,
                company_id: draft.company_id,
            });
        }
        Ok(())
    }
}
