//! Dashboard use-case service.
//!
//! # Responsibility
//! - Load registry, catalog and log data per company and run the cadence
//!   engine on it.
//! - Build the multi-company dashboard with per-company failure isolation.
//!
//! # Invariants
//! - One company's failure never removes another company's status. This
//!   includes registry rows that no longer decode or validate.
//! - Output order follows the registry listing order.
//! - Nothing derived here is persisted.

use crate::cadence::{compute_status, CompanyCommunicationStatus};
use crate::model::company::CompanyId;
use crate::repo::communication_repo::CommunicationRepository;
use crate::repo::company_repo::CompanyRepository;
use crate::repo::method_repo::MethodRepository;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};
use std::time::Instant;

/// One company whose status could not be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFailure {
    pub company_id: CompanyId,
    pub company_name: String,
    pub message: String,
    pub retryable: bool,
}

/// Dashboard computed over every registered company.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardReport {
    /// Successful statuses in registry order.
    pub statuses: Vec<CompanyCommunicationStatus>,
    pub failures: Vec<DashboardFailure>,
}

/// Cadence read service over the three leaf repositories.
pub struct DashboardService<C, M, L>
where
    C: CompanyRepository,
    M: MethodRepository,
    L: CommunicationRepository,
{
    companies: C,
    methods: M,
    log: L,
}

impl<C, M, L> DashboardService<C, M, L>
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

    /// Derives the status of one company as of `today`.
    ///
    /// # Errors
    /// - `NotFound` for an unknown company id.
    /// - `InvalidConfiguration` when the company's ladder is inconsistent.
    pub fn company_status(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> ServiceResult<CompanyCommunicationStatus> {
        let company = self
            .companies
            .get_company(company_id)?
            .ok_or_else(|| ServiceError::not_found("company", company_id))?;
        let methods = self.methods.list_methods(company.id)?;
        let events = self.log.list_communications(company.id)?;
        Ok(compute_status(&company, &methods, &events, today)?)
    }

    /// Derives every company's status as of `today`.
    ///
    /// # Errors
    /// - Fails only when the company listing itself cannot be read. A row
    ///   that fails to load is reported in `failures` like any other company.
    pub fn build_dashboard(&self, today: NaiveDate) -> ServiceResult<DashboardReport> {
        let started_at = Instant::now();
        let companies = self.companies.list_company_headers()?;
        let mut report = DashboardReport::default();

        for company in &companies {
            match self.company_status(company.id, today) {
                Ok(status) => report.statuses.push(status),
                Err(err) => {
                    warn!(
                        "event=dashboard_company module=dashboard status=error company_id={} retryable={} error={}",
                        company.id,
                        err.is_retryable(),
                        err
                    );
                    report.failures.push(DashboardFailure {
                        company_id: company.id,
                        company_name: company.name.clone(),
                        message: err.to_string(),
                        retryable: err.is_retryable(),
                    });
                }
            }
        }

        info!(
            "event=dashboard_build module=dashboard status=ok companies={} failures={} duration_ms={}",
            companies.len(),
            report.failures.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}
