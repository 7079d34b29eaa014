//! Command-line front end for outreach tracking.
//!
//! # Responsibility
//! - Layer command-line flags over the environment configuration.
//! - Map subcommands onto API calls and print their results.

mod cli;
mod render;

use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Command, CommandLine, CompanyCommand, LogCommand, MethodCommand};
use log::info;
use outreach_api::{
    parse_date, parse_id, ApiContext, ApiError, ApiResult, CommunicationInput, CompanyInput,
    MethodInput,
};
use outreach_core::{CoreConfig, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = CommandLine::parse();
    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLine) -> ApiResult<String> {
    let config = resolve_config(&cli)?;
    config.init_logging().map_err(ApiError::Logging)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        outreach_api::core_version()
    );

    let ctx = ApiContext::from_config(&config);
    match cli.command {
        Command::Dashboard { json, today } => {
            let today = match today {
                Some(raw) => parse_date(&raw)?,
                None => local_today(),
            };
            if json {
                outreach_api::dashboard_json(&ctx, today)
            } else {
                let report = outreach_api::dashboard(&ctx, today)?;
                Ok(render::dashboard(&report, today))
            }
        }
        Command::Company(command) => run_company(&ctx, command),
        Command::Method(command) => run_method(&ctx, command),
        Command::Log(command) => run_log(&ctx, command),
    }
}

fn resolve_config(cli: &CommandLine) -> ApiResult<CoreConfig> {
    let mut config = CoreConfig::from_env().map_err(ApiError::InvalidInput)?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.parse::<LogLevel>().map_err(ApiError::InvalidInput)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run_company(ctx: &ApiContext, command: CompanyCommand) -> ApiResult<String> {
    match command {
        CompanyCommand::Add(args) => {
            let company = outreach_api::create_company(
                ctx,
                CompanyInput {
                    name: args.name,
                    location: args.location,
                    linkedin: args.linkedin,
                    emails: args.emails,
                    phone_numbers: args.phones,
                    comments: args.comments,
                    periodicity_days: args.periodicity,
                },
            )?;
            Ok(format!("Company added: {}", company.id))
        }
        CompanyCommand::List => Ok(render::companies(&outreach_api::list_companies(ctx)?)),
        CompanyCommand::Remove { id } => {
            outreach_api::delete_company(ctx, parse_id(&id)?)?;
            Ok("Company removed.".to_string())
        }
    }
}

fn run_method(ctx: &ApiContext, command: MethodCommand) -> ApiResult<String> {
    match command {
        MethodCommand::Add {
            company,
            sequence,
            name,
            mandatory,
            description,
        } => {
            let method = outreach_api::add_method(
                ctx,
                parse_id(&company)?,
                MethodInput {
                    sequence,
                    mandatory,
                    name,
                    description,
                },
            )?;
            Ok(format!("Method added: {}", method.id))
        }
        MethodCommand::List { company } => Ok(render::methods(&outreach_api::list_methods(
            ctx,
            parse_id(&company)?,
        )?)),
        MethodCommand::Remove { id } => {
            outreach_api::delete_method(ctx, parse_id(&id)?)?;
            Ok("Method removed.".to_string())
        }
        MethodCommand::Seed { company } => Ok(render::methods(
            &outreach_api::seed_default_methods(ctx, parse_id(&company)?)?,
        )),
    }
}

fn run_log(ctx: &ApiContext, command: LogCommand) -> ApiResult<String> {
    match command {
        LogCommand::Add {
            company,
            method,
            date,
            notes,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => local_today(),
            };
            let event = outreach_api::log_communication(
                ctx,
                parse_id(&company)?,
                CommunicationInput {
                    method_id: parse_id(&method)?,
                    date,
                    notes,
                },
            )?;
            Ok(format!("Communication logged: {}", event.id))
        }
        LogCommand::List { company } => Ok(render::communications(
            &outreach_api::list_communications(ctx, parse_id(&company)?)?,
        )),
        LogCommand::Remove { id } => {
            outreach_api::delete_communication(ctx, parse_id(&id)?)?;
            Ok("Communication removed.".to_string())
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
