use clap::Parser;
use std::sync::Arc;
use study_portal::app::{AdminConsole, CompareView, ComparisonPicker};
use study_portal::config::{AdminCommand, CliConfig, Command, OutputFormat, Settings};
use study_portal::core::directory::DirectoryLoad;
use study_portal::core::navigation::{Navigator, Route};
use study_portal::core::search;
use study_portal::domain::model::{CollegeDetail, DetailTab, InterestForm};
use study_portal::domain::ports::CatalogBackend;
use study_portal::utils::error::{ErrorSeverity, PortalError, Result};
use study_portal::utils::logger;
use study_portal::{CachedCatalog, HttpBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting study-portal CLI");

    // 驗證配置
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(&config.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        if e.is_retryable() {
            tracing::warn!("🔁 Failure looks transient, the command can be retried");
            eprintln!("🔁 This looks temporary. Run the command again in a moment.");
        }

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,      // 使用者輸入問題，可修正
            ErrorSeverity::Medium => 2,   // 後端或網路，可重試
            ErrorSeverity::High => 1,     // 設定或授權
            ErrorSeverity::Critical => 3, // 系統錯誤
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, settings: &Settings) -> Result<()> {
    let http = HttpBackend::new(settings)?;
    let catalog: Arc<dyn CatalogBackend> =
        Arc::new(CachedCatalog::new(http.clone(), settings.refetch));

    match command {
        Command::Colleges { search } => list_colleges(catalog, search.as_deref()).await,
        Command::College { id, tab } => show_college(catalog.as_ref(), id, tab.as_deref()).await,
        Command::Compare { ids, format } => compare(catalog, ids, *format).await,
        Command::Countries => {
            for country in catalog.fetch_countries().await? {
                println!("{:<12} {}", country.id, country.name);
            }
            Ok(())
        }
        Command::Country { id } => {
            let country = catalog.fetch_country(id).await?;
            println!("{}\n", country.name);
            println!("{}", country.normalized_body());
            Ok(())
        }
        Command::Blogs => {
            for blog in catalog.fetch_blogs().await? {
                let date = blog
                    .published_on()
                    .map(|d| d.format("%b %d, %Y").to_string())
                    .unwrap_or_default();
                println!("{:<12} {} ({}, {})", blog.id, blog.title, blog.author, date);
            }
            Ok(())
        }
        Command::Blog { id } => {
            let blog = catalog.fetch_blog(id).await?;
            println!("{}", blog.summary.title);
            println!("by {}\n", blog.summary.author);
            println!("{}", blog.content);
            Ok(())
        }
        Command::Interest {
            name,
            phone,
            email,
            country,
            state,
            college,
        } => {
            let form = InterestForm {
                name: name.clone(),
                phone_number: phone.clone(),
                email_address: email.clone().unwrap_or_default(),
                country: country.clone().unwrap_or_default(),
                state: state.clone().unwrap_or_default(),
                college_of_interest: college.clone().unwrap_or_default(),
            };
            catalog.submit_interest(&form).await?;
            println!("✅ Thank you! Our counsellor will contact you soon.");
            Ok(())
        }
        Command::Admin { command } => admin(http, settings, command).await,
    }
}

async fn list_colleges(catalog: Arc<dyn CatalogBackend>, query: Option<&str>) -> Result<()> {
    let directory = DirectoryLoad::spawn(catalog).wait().await;
    let matches = search::filter(directory.as_slice(), query.unwrap_or(""));

    if matches.is_empty() {
        println!("No colleges found.");
    }
    for college in matches {
        println!("{:<16} {} ({})", college.id, college.name, college.location());
    }
    Ok(())
}

async fn show_college(catalog: &dyn CatalogBackend, id: &str, tab: Option<&str>) -> Result<()> {
    let tabs = match tab {
        Some(key) => vec![DetailTab::from_key(key).ok_or_else(|| PortalError::ValidationError {
            message: format!(
                "Unknown tab '{}'. Valid tabs: {}",
                key,
                DetailTab::ALL.map(|t| t.key()).join(", ")
            ),
        })?],
        None => DetailTab::ALL.to_vec(),
    };

    let detail: CollegeDetail = catalog.fetch_college(id).await?;
    println!("{}", detail.college.name);
    println!("{}", detail.college.location());

    for tab in tabs {
        println!("\n## {}\n", tab.label());
        println!("{}", detail.tab_content(tab));
    }
    Ok(())
}

/// 首頁的比較流程：載入目錄、依序填入欄位、按下 Compare Now、在比較頁輸出
async fn compare(
    catalog: Arc<dyn CatalogBackend>,
    ids: &[String],
    format: OutputFormat,
) -> Result<()> {
    let mut navigator = Navigator::new();
    let mut picker = ComparisonPicker::new();

    let load = DirectoryLoad::spawn(catalog);
    picker.finish_loading(load.wait().await);

    for (slot, id) in ids.iter().enumerate() {
        picker.open_slot(slot)?;
        picker.choose_by_id(id)?;
    }

    picker.compare_now(&mut navigator)?;

    match CompareView::from_navigator(&mut navigator)? {
        CompareView::Table(table) => match format {
            OutputFormat::Text => println!("{}", table.render_text()),
            OutputFormat::Csv => print!("{}", table.to_csv()?),
            OutputFormat::Json => println!("{}", table.to_json()?),
        },
        CompareView::Fallback(prompt) => {
            println!("{}", prompt.message);
            println!("[{}] -> {}", prompt.action_label, prompt.action);
        }
    }
    Ok(())
}

async fn admin(http: HttpBackend, settings: &Settings, command: &AdminCommand) -> Result<()> {
    settings.require_admin_token()?;
    let mut context = settings.session_context();
    let mut navigator = Navigator::new();

    let route = match command {
        AdminCommand::Customers { .. } => Route::AdminCustomers,
        AdminCommand::DeleteCollege { .. } => Route::AdminColleges,
        AdminCommand::DeleteCountry { .. } => Route::AdminCountries,
        AdminCommand::DeleteBlog { .. } => Route::AdminBlogs,
    };
    if navigator.visit(route, &context) == &Route::AdminLogin {
        return Err(PortalError::Unauthorized {
            message: "Admin session required".to_string(),
        });
    }

    let console = AdminConsole::new(http);
    match command {
        AdminCommand::Customers { search } => {
            let customers = console
                .customers(&mut context, search.as_deref().unwrap_or(""))
                .await?;
            for customer in customers {
                println!("{}", customer.fields()[1..].join(" | "));
            }
        }
        AdminCommand::DeleteCollege { id } => {
            console.delete_college(&mut context, id).await?;
            println!("✅ College {} deleted", id);
        }
        AdminCommand::DeleteCountry { id } => {
            console.delete_country(&mut context, id).await?;
            println!("✅ Country {} deleted", id);
        }
        AdminCommand::DeleteBlog { id } => {
            console.delete_blog(&mut context, id).await?;
            println!("✅ Blog {} deleted", id);
        }
    }
    Ok(())
}
