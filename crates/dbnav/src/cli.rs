use dbnav_core::{
    CatalogLister, DefaultPresentation, NavConfig, NavConfigStore, NavError, NavRequest,
    NavigationTree, encode_path,
};
use std::path::PathBuf;

const USAGE: &str = "\
usage: dbnav <catalog.json> [tree|state|path] [--a-path P] [--v-path P]
             [--pos N] [--page-size N] [--ajax] [--config FILE]
       dbnav encode <segment>...";

const EXIT_NOT_FOUND: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tree,
    State,
    Path,
}

impl Mode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "tree" => Some(Self::Tree),
            "state" => Some(Self::State),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    /// Incremental requests get a branch, lazy mode the active state and
    /// eager mode the whole tree.
    fn for_request(config: &NavConfig, is_ajax: bool) -> Self {
        if is_ajax {
            Self::Path
        } else if config.light_mode {
            Self::State
        } else {
            Self::Tree
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderOptions {
    catalog: PathBuf,
    mode: Option<Mode>,
    a_path: Option<String>,
    v_path: Option<String>,
    pos: u64,
    page_size: Option<usize>,
    ajax: bool,
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Render(RenderOptions),
    Encode(Vec<String>),
}

pub fn run(args: &[String]) -> i32 {
    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            return 1;
        }
    };

    match command {
        Command::Encode(segments) => {
            println!("{}", encode_path(&segments));
            0
        }
        Command::Render(options) => match render(&options) {
            Ok(Some(html)) => {
                print!("{}", html);
                0
            }
            Ok(None) => {
                eprintln!("Path not found: {}", options.a_path.as_deref().unwrap_or(""));
                EXIT_NOT_FOUND
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        },
    }
}

fn render(options: &RenderOptions) -> Result<Option<String>, NavError> {
    let config = match &options.config {
        Some(path) => NavConfigStore::at(path).load()?,
        None => NavConfigStore::new()?.load()?,
    };

    let mut lister = CatalogLister::load(&options.catalog)?;
    if let Some(page_size) = options.page_size {
        lister = lister.with_page_size(page_size);
    }
    let presentation = DefaultPresentation::default();

    let mut request = NavRequest::new(options.pos);
    request.a_path = options.a_path.clone();
    request.v_path = options.v_path.clone();
    request.is_ajax = options.ajax;

    let mode = options
        .mode
        .unwrap_or_else(|| Mode::for_request(&config, options.ajax));
    log::debug!("Rendering {:?} from {}", mode, options.catalog.display());

    let mut nav = NavigationTree::new(&config, &request, &lister, &presentation);
    match mode {
        Mode::Tree => nav.render_tree().map(Some),
        Mode::State => nav.render_state(),
        Mode::Path => nav.render_path(),
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut iter = args.iter();

    let first = iter.next().ok_or("missing catalog file")?;
    if first == "encode" {
        return Ok(Command::Encode(iter.cloned().collect()));
    }

    let mut options = RenderOptions {
        catalog: PathBuf::from(first),
        mode: None,
        a_path: None,
        v_path: None,
        pos: 0,
        page_size: None,
        ajax: false,
        config: None,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--a-path" => options.a_path = Some(value(&mut iter, arg)?.to_string()),
            "--v-path" => options.v_path = Some(value(&mut iter, arg)?.to_string()),
            "--pos" => {
                let raw = value(&mut iter, arg)?;
                options.pos = raw
                    .parse()
                    .map_err(|_| format!("invalid --pos value: {}", raw))?;
            }
            "--page-size" => {
                let raw = value(&mut iter, arg)?;
                let page_size = raw
                    .parse()
                    .map_err(|_| format!("invalid --page-size value: {}", raw))?;
                options.page_size = Some(page_size);
            }
            "--ajax" => options.ajax = true,
            "--config" => options.config = Some(PathBuf::from(value(&mut iter, arg)?)),
            other if other.starts_with("--") => return Err(format!("unknown option: {}", other)),
            other => match Mode::parse(other) {
                Some(mode) if options.mode.is_none() => options.mode = Some(mode),
                Some(_) => return Err(format!("mode given twice: {}", other)),
                None => return Err(format!("unknown mode: {}", other)),
            },
        }
    }

    Ok(Command::Render(options))
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn render_options(values: &[&str]) -> RenderOptions {
        match parse_args(&args(values)) {
            Ok(Command::Render(options)) => options,
            other => panic!("expected render options, got {:?}", other),
        }
    }

    #[test]
    fn parses_render_options() {
        let options = render_options(&[
            "shop.json",
            "path",
            "--a-path",
            "cm9vdA%3D%3D",
            "--pos",
            "50",
            "--page-size",
            "25",
            "--ajax",
            "--config",
            "/tmp/nav.json",
        ]);

        assert_eq!(options.catalog, PathBuf::from("shop.json"));
        assert_eq!(options.mode, Some(Mode::Path));
        assert_eq!(options.a_path.as_deref(), Some("cm9vdA%3D%3D"));
        assert_eq!(options.v_path, None);
        assert_eq!(options.pos, 50);
        assert_eq!(options.page_size, Some(25));
        assert!(options.ajax);
        assert_eq!(options.config, Some(PathBuf::from("/tmp/nav.json")));
    }

    #[test]
    fn mode_is_optional() {
        let options = render_options(&["shop.json"]);
        assert_eq!(options.mode, None);
        assert_eq!(options.pos, 0);
        assert!(!options.ajax);
    }

    #[test]
    fn default_mode_follows_request_and_config() {
        let light = NavConfig::default();
        let eager = NavConfig {
            light_mode: false,
            ..NavConfig::default()
        };

        assert_eq!(Mode::for_request(&light, true), Mode::Path);
        assert_eq!(Mode::for_request(&light, false), Mode::State);
        assert_eq!(Mode::for_request(&eager, false), Mode::Tree);
    }

    #[test]
    fn parses_encode() {
        assert_eq!(
            parse_args(&args(&["encode", "root", "shop"])),
            Ok(Command::Encode(vec!["root".to_string(), "shop".to_string()]))
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["shop.json", "--pos"])).is_err());
        assert!(parse_args(&args(&["shop.json", "--pos", "x"])).is_err());
        assert!(parse_args(&args(&["shop.json", "--verbose"])).is_err());
        assert!(parse_args(&args(&["shop.json", "forest"])).is_err());
        assert!(parse_args(&args(&["shop.json", "tree", "state"])).is_err());
    }

    #[test]
    fn renders_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        let config = dir.path().join("config.json");
        std::fs::write(&catalog, r#"{ "databases": { "shop": { "views": ["v"] } } }"#).unwrap();
        let views = encode_path(&["root", "shop", "views"]);
        let missing = encode_path(&["root", "nope"]);

        let options = render_options(&[
            catalog.to_str().unwrap(),
            "path",
            "--a-path",
            views.as_str(),
            "--config",
            config.to_str().unwrap(),
        ]);
        let html = render(&options).unwrap().unwrap();
        assert!(html.contains("v</a>"));

        let options = render_options(&[
            catalog.to_str().unwrap(),
            "path",
            "--a-path",
            missing.as_str(),
            "--config",
            config.to_str().unwrap(),
        ]);
        assert_eq!(render(&options).unwrap(), None);
    }
}
