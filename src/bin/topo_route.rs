//! 拓扑查询
//!
//! 加载拓扑快照（或生成 fat-tree 交换网络），把一个 REST 请求分发到
//! 拓扑接口，成功时把 JSON 响应体打印到 stdout。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sdn_route_rs::api::{Method, RestApi};
use sdn_route_rs::config::RouteConfig;
use sdn_route_rs::route::{EdgeSelection, Resolver};
use sdn_route_rs::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use sdn_route_rs::topo::{StaticTopology, TopologyError};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SelectionArg {
    Random,
    SeededRandom,
    LowestPort,
    FlowHash,
}

impl SelectionArg {
    fn into_selection(self, seed: u64) -> EdgeSelection {
        match self {
            SelectionArg::Random => EdgeSelection::Random,
            SelectionArg::SeededRandom => EdgeSelection::SeededRandom { seed },
            SelectionArg::LowestPort => EdgeSelection::LowestPort,
            SelectionArg::FlowHash => EdgeSelection::FlowHash { salt: seed },
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "topo_route", about = "拓扑查询：分发一个 REST 请求并打印 JSON 响应")]
struct Args {
    /// 拓扑快照 JSON 文件
    #[arg(long, conflicts_with = "fat_tree", required_unless_present = "fat_tree")]
    topology: Option<PathBuf>,

    /// 生成 k-ary fat-tree 交换网络代替快照文件
    #[arg(long)]
    fat_tree: Option<usize>,

    /// fat-tree 中每对相邻交换机之间的平行链路数
    #[arg(long, default_value_t = 1)]
    parallel_links: usize,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 平行链路选择策略（覆盖配置文件）
    #[arg(long, value_enum)]
    selection: Option<SelectionArg>,

    /// seeded-random 的种子，或 flow-hash 的盐
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// HTTP 方法
    #[arg(long, default_value = "GET")]
    method: Method,

    /// 请求路径，例如 /v1.0/topology/route/0000000000000001/00000001/0000000000000002/00000001
    path: String,
}

fn load_source(args: &Args) -> Result<StaticTopology, TopologyError> {
    match (&args.topology, args.fat_tree) {
        (Some(path), _) => StaticTopology::load(path),
        (None, Some(k)) => {
            let opts = FatTreeOpts {
                k,
                parallel_links: args.parallel_links,
                ..FatTreeOpts::default()
            };
            let topo = build_fat_tree(&opts)?;
            info!(
                k,
                switches = topo.snapshot.switches.len(),
                links = topo.snapshot.links.len(),
                "🌲 生成 fat-tree 拓扑"
            );
            Ok(StaticTopology::new(topo.snapshot))
        }
        (None, None) => Err(TopologyError::Unavailable(
            "either --topology or --fat-tree is required".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match args.config.as_deref().map(RouteConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if let Some(selection) = args.selection {
        config.edge_selection = selection.into_selection(args.seed);
    }

    // 初始化 tracing（日志写 stderr，stdout 只留给响应体）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let source = match load_source(&args) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "加载拓扑失败");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let api = RestApi::new(Resolver::with_selection(source, config.edge_selection));
    let reply = match api.dispatch(args.method.clone(), &args.path).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "请求分发失败");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    info!(status = %reply.status, "请求完成");
    if reply.is_success() {
        println!("{}", reply.body);
        ExitCode::SUCCESS
    } else if reply.body.is_empty() {
        eprintln!("{}", reply.status);
        ExitCode::from(1)
    } else {
        eprintln!("{}", reply.body);
        ExitCode::from(1)
    }
}
