use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gridfill_core::ArtKind;
use gridfill_lib::{
    Settings, load_settings_from, resolve_install_root, resolve_token,
    save_settings_to, settings_path,
};

use crate::cli_types::{RootArgs, SearchArgs};
use crate::error::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", s.chars().take(4).collect::<String>())
    }
}

/// Show resolved settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings_from(&path)?;

    log::info!(
        "{}",
        "gridfill Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let (root, root_source) = resolve_install_root(None, &settings);
    let (token, token_source) = resolve_token(None, &settings);

    let fields = [
        ("root", root.map(|r| r.display().to_string()), root_source),
        ("token", token.map(|t| mask_value(&t)), token_source),
    ];
    for (name, value, source) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {:<8} {} {}",
                name,
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {:<8} {}",
                name,
                "not set".if_supports_color(Stdout, |t| t.red()),
            ),
        }
    }

    let styles = settings
        .steamgriddb
        .styles
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",");
    log::info!("  {:<8} {}", "styles", styles);
    log::info!("  {:<8} {}", "type", settings.steamgriddb.kind);
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Merge the given flags into the stored settings.
pub(crate) fn apply_flags(settings: &mut Settings, root: RootArgs, search: SearchArgs) {
    if let Some(root) = root.root {
        settings.steam.root = Some(root);
    }
    if let Some(token) = search.token {
        settings.steamgriddb.token = Some(token);
    }
    if let Some(styles) = search.styles {
        settings.steamgriddb.styles = styles;
    }
    if search.animated {
        settings.steamgriddb.kind = ArtKind::Animated;
    }
}

/// Store flag values in the settings file.
pub(crate) fn run_config_save(root: RootArgs, search: SearchArgs) -> Result<(), CliError> {
    let path = settings_path();
    let mut settings = load_settings_from(&path)?;
    apply_flags(&mut settings, root, search);

    if let Some(root) = &settings.steam.root {
        if !gridfill_lib::is_valid_install(root) {
            log::warn!(
                "{} {} does not look like a Steam installation",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                root.display(),
            );
        }
    }

    save_settings_to(&path, &settings)?;
    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if std::env::var(gridfill_lib::TOKEN_ENV).is_ok() {
        log::info!(
            "{}",
            format!(
                "Note: {} is set and takes precedence over the stored token",
                gridfill_lib::TOKEN_ENV
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
