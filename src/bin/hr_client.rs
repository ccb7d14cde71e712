use anyhow::Context;
use clap::{Parser, Subcommand};
use hr_dashboard::domain::auth::{LoginCredentials, SignupRequest};
use hr_dashboard::utils::error::ErrorSeverity;
use hr_dashboard::utils::logger;
use hr_dashboard::config::{self, BackendArgs};
use hr_dashboard::{HrClient, HrError, RemoteCollection, Resource, ResourceClient};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "hr_client")]
#[command(about = "Command-line access to the remote HR backend")]
struct Args {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the bearer token
    Login { email: String, password: String },
    /// Register a new user
    Signup {
        email: String,
        password: String,
        first_name: String,
        last_name: String,
        #[arg(long, default_value = "Employee")]
        role: String,
    },
    /// Check whether the configured token is still accepted
    Validate,
    Employees {
        #[command(subcommand)]
        action: ReadAction,
    },
    Departments {
        #[command(subcommand)]
        action: ReadAction,
    },
    Attendances {
        #[command(subcommand)]
        action: ReadAction,
    },
    LeaveRequests {
        #[command(subcommand)]
        action: ReadAction,
    },
    Salaries {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// List employees visible to a user
    EmployeesByUser { user_id: u64 },
    /// Shift a department's cached employee count
    EmployeeCount {
        department_id: u64,
        #[arg(allow_hyphen_values = true)]
        change: i64,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ReadAction {
    List,
    Get { id: u64 },
    Delete { id: u64 },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_action<R>(collection: ResourceClient<'_, R>, action: ReadAction) -> anyhow::Result<()>
where
    R: Resource + Serialize,
{
    match action {
        ReadAction::List => print_json(&collection.list().await?),
        ReadAction::Get { id } => print_json(&collection.get(id).await?),
        ReadAction::Delete { id } => {
            collection.delete(id).await?;
            println!("✅ Deleted {} {}", R::LABEL, id);
            Ok(())
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let loaded = config::load(args.backend.into())?;
    logger::init_logger(
        loaded.verbose,
        loaded.provider.json_logs(),
        loaded.provider.log_level(),
    );

    let provider = loaded.provider;
    let mut client = HrClient::new(provider.api_base_url(), provider.request_timeout_secs())?;
    client.set_token(provider.api_token().map(str::to_string));

    match args.command {
        Command::Login { email, password } => {
            let auth = client
                .login(&LoginCredentials { email, password })
                .await
                .context("login request")?;
            println!("{}", auth.token);
        }
        Command::Signup {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            client
                .signup(&SignupRequest {
                    email,
                    password,
                    first_name,
                    last_name,
                    role,
                })
                .await?;
            println!("✅ Signed up");
        }
        Command::Validate => {
            if client.validate_session().await {
                println!("✅ Session is valid");
            } else {
                return Err(HrError::Unauthorized.into());
            }
        }
        Command::Employees { action } => run_action(client.employees(), action).await?,
        Command::Departments { action } => run_action(client.departments(), action).await?,
        Command::Attendances { action } => run_action(client.attendances(), action).await?,
        Command::LeaveRequests { action } => {
            run_action(client.leave_requests(), action).await?
        }
        Command::Salaries { action } => run_action(client.salaries(), action).await?,
        Command::EmployeesByUser { user_id } => {
            print_json(&client.employees_by_user(user_id).await?)?
        }
        Command::EmployeeCount {
            department_id,
            change,
        } => {
            client.update_employee_count(department_id, change).await?;
            println!("✅ Department {} count changed by {}", department_id, change);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("❌ {:#}", e);
        let exit_code = match e.downcast_ref::<HrError>() {
            Some(hr) => {
                eprintln!("💡 建議: {}", hr.recovery_suggestion());
                match hr.severity() {
                    ErrorSeverity::Low | ErrorSeverity::High => 1,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => 1,
        };
        std::process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_server_flags_are_not_accepted() {
        assert!(Args::try_parse_from(["hr_client", "--bind", "0.0.0.0:80", "validate"]).is_err());

        let args = Args::try_parse_from([
            "hr_client",
            "--api-url",
            "http://hr.example.com/api",
            "employee-count",
            "3",
            "-2",
        ])
        .unwrap();
        assert_eq!(args.backend.api_url, "http://hr.example.com/api");
        assert!(matches!(
            args.command,
            Command::EmployeeCount {
                department_id: 3,
                change: -2
            }
        ));
    }
}
