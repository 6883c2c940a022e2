//! Charm-style CLI prompts using cliclack

use crate::generate::{self, GeneratorConfig, Language};
use crate::plugin::{self, PlatformConfig};
use crate::remote::{self, GithubRemote, RemoteAuth, RemoteProvider};
use crate::sdk;
use crate::templates::TemplateRenderer;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Environment variable overriding the templates directory
pub const TEMPLATE_DIR_ENV: &str = "ANDLIB_TEMPLATE_DIR";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Destination directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Library name (skips the name prompt)
    pub name: Option<String>,

    /// Java package (skips the package prompt)
    pub package: Option<String>,

    /// Remote to select a fork organization on (e.g. "github")
    pub git_fork: Option<String>,

    /// API token for the remote; falls back to the GITREMOTE_TOKEN env var
    pub git_remote_token: Option<String>,

    /// Exclude default dependencies from the module build.gradle
    pub exclude_dependencies: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the generator with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("Android Library Generator")?;

    // Step 1: Destination and templates
    let dest_root = select_directory(&args)?;
    let renderer = TemplateRenderer::new(templates_root(&args));

    // Step 2: Extract platform configuration from an existing plugin.xml
    let platform = load_platform_config(&dest_root).await?;

    // Step 3: Library name and package
    let name = prompt_name(&args)?;
    let module = name.to_lowercase();
    let package = prompt_package(&args, &platform, &module)?;

    // Step 4: Fork organization on the hosted Git remote
    let remote_group = select_remote_group(&args).await?;

    // Step 5: Language and SDK range
    let lang = select_language(&args)?;
    let (min_sdk, target_sdk) = select_sdk_range(&args)?;

    let config = GeneratorConfig {
        name,
        module,
        package,
        lang,
        min_sdk,
        target_sdk,
        remote_group,
        exclude_dependencies: args.exclude_dependencies,
        platform,
    };

    // Step 6: Write the module and relocate plugin sources
    create_module(&config, &renderer, &dest_root).await?;

    // Step 7: Show next steps
    print_next_steps(&config)?;

    Ok(())
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.exists() {
        anyhow::bail!("Destination directory does not exist: {}", path.display());
    }

    cliclack::log::info(format!("Destination: {}", path.display()))?;
    Ok(path)
}

fn templates_root(args: &CreateArgs) -> PathBuf {
    if let Some(dir) = &args.template_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from("templates")
}

/// Read and extract plugin.xml from the destination when present
async fn load_platform_config(dest_root: &std::path::Path) -> Result<PlatformConfig> {
    let descriptor_path = dest_root.join(plugin::PLUGIN_DESCRIPTOR);
    if !descriptor_path.exists() {
        return Ok(PlatformConfig::default());
    }

    let xml = tokio::fs::read_to_string(&descriptor_path).await?;
    match plugin::decode(&xml) {
        Ok(doc) => {
            let platform = PlatformConfig::extract_android(&doc);
            if platform.is_empty() {
                cliclack::log::warning(format!(
                    "{} has no android platform entry",
                    plugin::PLUGIN_DESCRIPTOR
                ))?;
            } else {
                cliclack::log::success("Detected Cordova plugin configuration")?;
            }
            Ok(platform)
        }
        Err(err) => {
            cliclack::log::warning(format!(
                "Ignoring unreadable {}: {}",
                plugin::PLUGIN_DESCRIPTOR,
                err
            ))?;
            Ok(PlatformConfig::default())
        }
    }
}

fn prompt_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        return Ok(name.clone());
    }
    if args.yes {
        return Ok("Lib".to_string());
    }

    let name: String = cliclack::input("Name of your library")
        .placeholder("Lib")
        .default_input("Lib")
        .interact()?;
    Ok(name)
}

fn prompt_package(args: &CreateArgs, platform: &PlatformConfig, module: &str) -> Result<String> {
    if let Some(package) = &args.package {
        return Ok(package.clone());
    }

    let default_package = match &platform.package {
        Some(package) => format!("{}.{}", package, module),
        None => "com.example.app".to_string(),
    };
    if args.yes {
        return Ok(default_package);
    }

    let package: String = cliclack::input("Package name for your library")
        .placeholder(&default_package)
        .default_input(&default_package)
        .interact()?;
    Ok(package)
}

/// Resolve credentials, list the user's organizations and derive the Maven
/// group for the selected one. Returns None when no remote flow was requested
/// or no credentials are available.
async fn select_remote_group(args: &CreateArgs) -> Result<Option<String>> {
    let Some(remote_name) = &args.git_fork else {
        return Ok(None);
    };

    let auth = match resolve_auth(args)? {
        Some(auth) => auth,
        None => {
            cliclack::log::info("Continuing without a remote organization")?;
            return Ok(None);
        }
    };

    let remote = GithubRemote::new(auth)?;

    let spinner = cliclack::spinner();
    spinner.start("Listing remote organizations...");
    let orgs = match remote.list_orgs().await {
        Ok(orgs) => {
            spinner.stop(format!("Found {} organizations", orgs.len()));
            orgs
        }
        Err(err) => {
            spinner.stop("Could not list organizations");
            cliclack::log::warning(format!("{}", err))?;
            return Ok(None);
        }
    };

    if orgs.is_empty() {
        return Ok(None);
    }

    let login = if args.yes {
        orgs[0].login.clone()
    } else {
        let mut select = cliclack::select("Which remote organization/group to fork this project?");
        for (idx, org) in orgs.iter().enumerate() {
            select = select.item(idx, &org.login, "");
        }
        let selected_idx: usize = select.interact()?;
        orgs[selected_idx].login.clone()
    };

    Ok(Some(remote::group_id(remote_name, &login)))
}

/// Token from flag or environment, otherwise prompted basic credentials
fn resolve_auth(args: &CreateArgs) -> Result<Option<RemoteAuth>> {
    let token = args
        .git_remote_token
        .clone()
        .or_else(|| std::env::var(remote::REMOTE_TOKEN_ENV).ok())
        .filter(|token| !token.is_empty());

    if let Some(token) = token {
        return Ok(Some(RemoteAuth::Token(token)));
    }
    if args.yes {
        return Ok(None);
    }

    let username: String = cliclack::input("Git remote username")
        .validate(|value: &String| {
            if value.trim().is_empty() {
                Err("Username is required!")
            } else {
                Ok(())
            }
        })
        .interact()?;

    let password: String = cliclack::password("Git remote password")
        .mask('*')
        .interact()?;

    Ok(Some(RemoteAuth::Basic { username, password }))
}

fn select_language(args: &CreateArgs) -> Result<Language> {
    if args.yes {
        return Ok(Language::Java);
    }

    let lang: Language = cliclack::select("Java or Kotlin?")
        .item(Language::Java, Language::Java.display_name(), "")
        .interact()?;
    Ok(lang)
}

fn select_sdk_range(args: &CreateArgs) -> Result<(u32, u32)> {
    if args.yes {
        return Ok((sdk::DEFAULT_MIN_API, sdk::latest().api));
    }

    let mut min_select = cliclack::select("Minimum Android SDK");
    for version in sdk::versions() {
        min_select = min_select.item(version.api, version.label(), "");
    }
    let min_sdk: u32 = min_select.initial_value(sdk::DEFAULT_MIN_API).interact()?;

    let mut target_select = cliclack::select("Target Android SDK");
    for version in sdk::versions() {
        target_select = target_select.item(version.api, version.label(), "");
    }
    let target_sdk: u32 = target_select.initial_value(sdk::latest().api).interact()?;

    if target_sdk < min_sdk {
        cliclack::log::warning(format!(
            "Target SDK {} is below minimum SDK {}",
            target_sdk, min_sdk
        ))?;
    }

    Ok((min_sdk, target_sdk))
}

async fn create_module(
    config: &GeneratorConfig,
    renderer: &TemplateRenderer,
    dest_root: &std::path::Path,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating library module...");

    let written = generate::write_module(config, renderer, dest_root).await?;
    generate::normalize_source_files(config, dest_root).await?;

    spinner.stop(format!(
        "Created {} files in android/{}",
        written.len(),
        config.module
    ));

    let removed = generate::cleanup_source_files(config, dest_root).await?;
    if !removed.is_empty() {
        cliclack::log::info(format!(
            "Cleanup original *.{} files: {}",
            config.lang.source_extension(),
            removed.join(", ")
        ))?;
    }

    Ok(())
}

fn print_next_steps(config: &GeneratorConfig) -> Result<()> {
    let steps = [
        "cd android".to_string(),
        format!("./gradlew :{}:assemble", config.module),
    ];

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.yellow());
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
