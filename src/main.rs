//! `civic` - command-line front end for the civic issue tracker.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use civic_client::models::{Issue, NewIssue, Role, Severity};
use civic_client::stats::MAX_TIMELINE_DAYS;
use civic_client::{
    ApiClient, ClientError, Config, IssueQuery, IssueStats, SessionState, SortKey,
    SqliteSessionStore,
};

#[derive(Parser)]
#[command(name = "civic", version, about = "Report and track civic issues")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the session
    Login { email: String, password: String },
    /// Create an account (citizens are logged in right away)
    Signup {
        email: String,
        password: String,
        full_name: String,
        /// Request a staff account instead of a citizen one
        #[arg(long)]
        staff: bool,
        /// Why staff access is needed
        #[arg(long)]
        reason: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// List issues with client-side filtering and sorting
    Issues {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "all")]
        severity: String,
        /// recent, upvotes or severity
        #[arg(long, default_value = "recent")]
        sort: SortKey,
    },
    /// Show one issue with its comments and assignments
    Show { id: i64 },
    /// List comments on an issue
    Comments { id: i64 },
    /// Comment on an issue as the logged-in user
    Comment { id: i64, content: String },
    DeleteComment { issue_id: i64, comment_id: i64 },
    Upvote { id: i64 },
    Unvote { id: i64 },
    /// Report a new issue
    Report {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        /// LOW, MEDIUM, HIGH or CRITICAL
        #[arg(long)]
        severity: String,
        /// Free-text address; ignored when --lat and --lng are given
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an issue
    Delete { id: i64 },
    Departments,
    Staff,
    /// Assign an issue to a department
    Assign {
        issue_id: i64,
        #[arg(long)]
        department: i64,
        #[arg(long)]
        staff: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Assignments { id: i64 },
    /// Summary counts over the latest issues
    Stats {
        #[arg(
            long,
            default_value_t = 30,
            value_parser = clap::value_parser!(u32).range(1..=MAX_TIMELINE_DAYS as i64)
        )]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Backend: {}", config.api_url);
    tracing::debug!("Session path: {:?}", config.session_path);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            if matches!(e, ClientError::Unauthorized) {
                eprintln!("hint: the session is missing or expired, run `civic login`");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), ClientError> {
    let store = Arc::new(SqliteSessionStore::open(&config.session_path).await?);
    let client = ApiClient::new(config, store)?;

    match command {
        Command::Login { email, password } => {
            let outcome = client.login(&email, &password).await?;
            println!("Logged in as {} ({})", email, outcome.role);
            if outcome.role_defaulted {
                println!("warning: could not load your profile, acting as citizen");
            }
        }
        Command::Signup {
            email,
            password,
            full_name,
            staff,
            reason,
        } => {
            let role = if staff { Role::Staff } else { Role::Citizen };
            match client
                .signup(&email, &password, &full_name, role, reason.as_deref())
                .await?
            {
                Some(outcome) => println!("Signed up and logged in as {}", outcome.role),
                None => println!("Staff request submitted; log in once it is approved"),
            }
        }
        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match client.session().await? {
            SessionState::LoggedOut => println!("Not logged in"),
            SessionState::LoggedIn {
                email,
                role,
                user_id,
            } => match user_id {
                Some(id) => println!("{} ({}, user #{})", email, role, id),
                None => println!("{} ({})", email, role),
            },
        },
        Command::Issues {
            page,
            size,
            search,
            category,
            status,
            severity,
            sort,
        } => {
            let fetched = client.get_issues(page, size).await?;
            let query = IssueQuery::from_criteria(&search, &category, &status, &severity, sort);
            let visible = query.apply(&fetched.content);

            if visible.is_empty() {
                println!("No issues found matching your filters.");
            }
            for issue in &visible {
                print_issue_line(issue);
            }
            println!(
                "-- {} of {} on page {}/{} ({} total)",
                visible.len(),
                fetched.content.len(),
                fetched.number + 1,
                fetched.total_pages.max(1),
                fetched.total_elements
            );
        }
        Command::Show { id } => {
            let issue = client.get_issue_by_id(id).await?;
            print_issue_line(&issue);
            if let Some(description) = &issue.description {
                println!("  {}", description);
            }
            if let Some(coords) = issue.coordinates() {
                println!("  location: {:.5}, {:.5}", coords.lat, coords.lng);
            }
            if let Some(reporter) = &issue.reporter_name {
                println!("  reported by {} at {}", reporter, issue.created_at);
            }

            match client.get_assignments(id).await {
                Ok(assignments) => {
                    for a in assignments {
                        let staff = a.staff_name.as_deref().unwrap_or("unassigned staff");
                        println!("  assigned to {} / {} at {}", a.department_name, staff, a.assigned_at);
                    }
                }
                Err(e) => tracing::debug!(error = %e, "Assignments unavailable"),
            }

            for comment in client.get_comments_by_issue_id(id).await? {
                println!("  [{}] {}: {}", comment.created_at, comment.author_name, comment.content);
            }
        }
        Command::Comments { id } => {
            for comment in client.get_comments_by_issue_id(id).await? {
                println!(
                    "#{} [{}] {}: {}",
                    comment.id, comment.created_at, comment.author_name, comment.content
                );
            }
        }
        Command::Comment { id, content } => {
            let author_id = current_user_id(&client).await?;
            let comment = client.add_comment(id, &content, author_id).await?;
            println!("Comment #{} added", comment.id);
        }
        Command::DeleteComment {
            issue_id,
            comment_id,
        } => {
            client.delete_comment(issue_id, comment_id).await?;
            println!("Comment #{} deleted", comment_id);
        }
        Command::Upvote { id } => {
            current_user_id(&client).await?;
            client.upvote_issue(id).await?;
            println!("Issue #{} upvoted", id);
        }
        Command::Unvote { id } => {
            current_user_id(&client).await?;
            client.remove_upvote(id).await?;
            println!("Upvote removed from issue #{}", id);
        }
        Command::Report {
            title,
            category,
            severity,
            address,
            lat,
            lng,
            description,
        } => {
            let severity = Severity::from_str(&severity).ok_or_else(|| {
                ClientError::Validation(format!("unknown severity '{}'", severity))
            })?;
            let address = match (lat, lng) {
                (Some(lat), Some(lng)) => NewIssue::at_coordinates(lat, lng),
                _ => address,
            };
            let new_issue = NewIssue {
                reporter_id: current_user_id(&client).await?,
                title,
                category,
                severity,
                address,
                description,
            };
            let issue = client.add_issue(&new_issue).await?;
            println!("Issue #{} reported", issue.id);
        }
        Command::Delete { id } => {
            client.delete_issue(id).await?;
            println!("Issue #{} deleted", id);
        }
        Command::Departments => {
            for department in client.get_departments().await? {
                println!("#{} {}", department.id, department.name);
            }
        }
        Command::Staff => {
            for user in client.get_staff_users().await? {
                println!("#{} {} <{}>", user.id, user.full_name, user.email);
            }
        }
        Command::Assign {
            issue_id,
            department,
            staff,
            notes,
        } => {
            let assignment = client
                .assign_issue(issue_id, department, staff, notes)
                .await?;
            println!(
                "Issue #{} assigned to {}",
                assignment.issue_id, assignment.department_name
            );
        }
        Command::Assignments { id } => {
            for a in client.get_assignments(id).await? {
                println!(
                    "#{} {} staff={} notes={} at {}",
                    a.id,
                    a.department_name,
                    a.staff_name.as_deref().unwrap_or("-"),
                    a.notes.as_deref().unwrap_or("-"),
                    a.assigned_at
                );
            }
        }
        Command::Stats { days } => {
            let page = client.get_issues(0, 100).await?;
            let stats = IssueStats::from_issues(&page.content);

            println!(
                "total {}  open {}  in progress {}  resolved {}",
                stats.total, stats.open, stats.in_progress, stats.resolved
            );
            for (category, count) in &stats.by_category {
                println!("  {:<16} {}", category, count);
            }
            for severity in Severity::ALL.iter().rev() {
                println!("  {:<16} {}", severity, stats.count_for(*severity));
            }
            let today = Utc::now().date_naive();
            for point in IssueStats::timeline(&page.content, today, days) {
                println!("  {}  {}", point.date, point.issues);
            }
        }
    }

    Ok(())
}

/// The logged-in user's id, fetching the profile if it has not been stored yet.
async fn current_user_id(client: &ApiClient) -> Result<i64, ClientError> {
    match client.session().await? {
        SessionState::LoggedOut => Err(ClientError::Unauthorized),
        SessionState::LoggedIn {
            user_id: Some(id), ..
        } => Ok(id),
        SessionState::LoggedIn { user_id: None, .. } => Ok(client.get_current_user().await?.id),
    }
}

fn print_issue_line(issue: &Issue) {
    println!(
        "#{:<5} {:<8} {:<11} {:>4}^  {}  [{}] @ {}",
        issue.id,
        issue.severity.as_str(),
        issue.status.as_str(),
        issue.vote_count(),
        issue.title,
        issue.category,
        issue.address
    );
}
