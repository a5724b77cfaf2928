use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use sprout::{
    api,
    descriptor::{
        CssVariant, ProjectDescriptor, DEFAULT_PLATFORM, DEFAULT_SOURCE_DIR, DEFAULT_TARGET,
        DEFAULT_TEMPLATE,
    },
    paths, prompt,
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(create_command())
        .subcommand(refresh_command())
        .subcommand(page_command())
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("create", args)) => handle_create(args),
        Some(("refresh", args)) => handle_refresh(args),
        Some(("page", args)) => handle_page(args),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn template_root_arg() -> Arg {
    Arg::new("template-root")
        .long("template-root")
        .help("Directory containing the bundled templates")
}

fn create_command() -> Command {
    Command::new("create")
        .about("Creates a new project from a bundled template")
        .arg(Arg::new("name").help("Name of the project directory to create"))
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .help("Directory the project is created under")
                .default_value("."),
        )
        .arg(
            Arg::new("app-name")
                .long("app-name")
                .help("Human-readable application name"),
        )
        .arg(
            Arg::new("app-id")
                .long("app-id")
                .help("Reverse-domain application identifier"),
        )
        .arg(
            Arg::new("src")
                .long("src")
                .help("Name of the web source subdirectory")
                .default_value(DEFAULT_SOURCE_DIR),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Template name")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .help("Platform target identifier")
                .default_value(DEFAULT_PLATFORM),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .help("Native toolchain target suffix")
                .default_value(DEFAULT_TARGET),
        )
        .arg(
            Arg::new("typescript")
                .long("typescript")
                .help("Set the project up for TypeScript")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("css")
                .long("css")
                .help("Stylesheet variant: css, scss or less")
                .default_value("css"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Seed the source tree with the example app")
                .action(ArgAction::SetTrue),
        )
        .arg(template_root_arg())
}

fn refresh_command() -> Command {
    Command::new("refresh")
        .about("Overwrites the platform-native core of an existing project from the template")
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help("Existing project directory")
                .default_value("."),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Template name")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .help("Platform target identifier")
                .default_value(DEFAULT_PLATFORM),
        )
        .arg(template_root_arg())
}

fn page_command() -> Command {
    Command::new("page")
        .about("Renders a new page stylesheet into an existing project")
        .arg(Arg::new("name").help("Page name").required(true))
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help("Existing project directory")
                .default_value("."),
        )
        .arg(
            Arg::new("src")
                .long("src")
                .help("Name of the web source subdirectory")
                .default_value(DEFAULT_SOURCE_DIR),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Template name")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(template_root_arg())
}

fn template_root_from(args: &ArgMatches) -> PathBuf {
    paths::template_root(args.get_one::<String>("template-root").map(PathBuf::from))
}

fn handle_create(args: &ArgMatches) -> miette::Result<()> {
    let template_root = template_root_from(args);

    let project_name = match args.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => prompt::project_name()?,
    };
    let app_name = match args.get_one::<String>("app-name") {
        Some(name) => name.clone(),
        None => prompt::app_name(&project_name)?,
    };
    let app_id = match args.get_one::<String>("app-id") {
        Some(id) => id.clone(),
        None => prompt::app_id(&format!("com.example.{project_name}"))?,
    };

    let descriptor = ProjectDescriptor {
        project_name,
        target_dir: PathBuf::from(args.get_one::<String>("dir").expect("dir has a default")),
        app_name,
        source_subdir: args
            .get_one::<String>("src")
            .expect("src has a default")
            .clone(),
        template: args
            .get_one::<String>("template")
            .expect("template has a default")
            .clone(),
        typescript: args.get_flag("typescript"),
        css: CssVariant::from(
            args.get_one::<String>("css")
                .expect("css has a default")
                .as_str(),
        ),
        platform: args
            .get_one::<String>("platform")
            .expect("platform has a default")
            .clone(),
        app_id,
        target_name: args
            .get_one::<String>("target")
            .expect("target has a default")
            .clone(),
        with_demo: args.get_flag("demo"),
    };

    api::create_project(&template_root, &descriptor)?;

    Ok(())
}

fn handle_refresh(args: &ArgMatches) -> miette::Result<()> {
    let template_root = template_root_from(args);
    let project_dir = PathBuf::from(
        args.get_one::<String>("project-dir")
            .expect("project-dir has a default"),
    );
    let template = args
        .get_one::<String>("template")
        .expect("template has a default");
    let platform = args
        .get_one::<String>("platform")
        .expect("platform has a default");

    api::refresh_core(&template_root, template, &project_dir, platform)?;

    Ok(())
}

fn handle_page(args: &ArgMatches) -> miette::Result<()> {
    let template_root = template_root_from(args);
    let page = args.get_one::<String>("name").expect("name is required");
    let project_dir = PathBuf::from(
        args.get_one::<String>("project-dir")
            .expect("project-dir has a default"),
    );
    let src = args.get_one::<String>("src").expect("src has a default");
    let template = args
        .get_one::<String>("template")
        .expect("template has a default");

    api::create_page(&template_root, template, &project_dir, src, page)?;

    Ok(())
}
