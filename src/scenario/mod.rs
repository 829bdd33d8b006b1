//! 场景配置与输入装载
//!
//! 一次运行由三份输入驱动：
//! - 场景 JSON（窗口大小、TO/PT/TD/ED/DD/LP、种子、文件路径）；
//! - coordinator 行 `<senderNode>,<startTime>`，指定初始发送端与
//!   场景起始偏移；
//! - 每端点一份消息文件，每行 `<四位故障码><分隔符><载荷>`，
//!   `#` 开头的行忽略。
//!
//! 装载/IO 故障一律致命：以 `ScenarioError` 逃逸并终止运行，
//! 不做部分状态恢复。

use crate::channel::{Channel, FaultFlags};
use crate::node::{ArqWorld, Bootstrap, Endpoint, MessageRecord, NodeId, RECEIVER_MARKER};
use crate::sim::{SimTime, Simulator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// 装载阶段的致命错误。
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse scenario json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed coordinator line {line:?}")]
    BadCoordinator { line: String },
    #[error("input line {line}: malformed message line {text:?}")]
    BadMessageLine { line: usize, text: String },
    #[error("scenario must name exactly two input files, got {0}")]
    BadInputCount(usize),
    #[error("window_size must be positive")]
    BadWindow,
}

fn default_processing_delay() -> f64 {
    1.0
}

/// 场景描述（JSON）。时间字段以时间单位计，允许一位小数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub window_size: usize,
    /// 重传超时 TO。
    pub timeout: f64,
    /// 处理时延 PT。
    #[serde(default = "default_processing_delay")]
    pub processing_delay: f64,
    /// 传输时延 TD。
    #[serde(default)]
    pub transmission_delay: f64,
    /// 额外错误延迟 ED。
    #[serde(default)]
    pub error_delay: f64,
    /// 重复帧间隔 DD。
    #[serde(default)]
    pub duplicate_delay: f64,
    /// 控制帧丢失概率 LP。
    #[serde(default)]
    pub loss_probability: f64,
    #[serde(default)]
    pub seed: u64,
    /// coordinator 文件路径。
    pub coordinator: PathBuf,
    /// 两个端点各自的消息文件路径。
    pub inputs: Vec<PathBuf>,
}

impl ScenarioSpec {
    pub fn load(path: &Path) -> Result<ScenarioSpec, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// 一次运行的固定参数（信道参数单独归 `Channel`）。
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub window_size: usize,
    pub timeout: SimTime,
    pub processing_delay: SimTime,
    pub transmission_delay: SimTime,
}

impl RunParams {
    pub fn from_spec(spec: &ScenarioSpec) -> Result<RunParams, ScenarioError> {
        if spec.window_size == 0 {
            return Err(ScenarioError::BadWindow);
        }
        Ok(RunParams {
            window_size: spec.window_size,
            timeout: SimTime::from_units_f64(spec.timeout),
            processing_delay: SimTime::from_units_f64(spec.processing_delay),
            transmission_delay: SimTime::from_units_f64(spec.transmission_delay),
        })
    }
}

/// 解析 coordinator 行：`<senderNode>,<startTime>`。
pub fn parse_coordinator(line: &str) -> Result<(NodeId, SimTime), ScenarioError> {
    let bad = || ScenarioError::BadCoordinator {
        line: line.to_string(),
    };
    let (node, start) = line.trim().split_once(',').ok_or_else(bad)?;
    let node: usize = node.trim().parse().map_err(|_| bad())?;
    if node > 1 {
        return Err(bad());
    }
    let start: f64 = start.trim().parse().map_err(|_| bad())?;
    if !start.is_finite() || start < 0.0 {
        return Err(bad());
    }
    Ok((NodeId(node), SimTime::from_units_f64(start)))
}

pub fn load_coordinator(path: &Path) -> Result<(NodeId, SimTime), ScenarioError> {
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ScenarioError::BadCoordinator {
            line: String::new(),
        })?;
    parse_coordinator(line)
}

/// 解析一个端点的消息文件：前四个字符是故障码，跳过一个分隔符，
/// 其余是载荷。
pub fn parse_messages(text: &str) -> Result<Vec<MessageRecord>, ScenarioError> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let bad = || ScenarioError::BadMessageLine {
            line: lineno + 1,
            text: line.to_string(),
        };
        if line.len() < 5 || !line.is_char_boundary(4) || !line.is_char_boundary(5) {
            return Err(bad());
        }
        let flags = FaultFlags::from_code(&line[..4]).ok_or_else(bad)?;
        out.push(MessageRecord {
            flags,
            payload: line[5..].to_string(),
        });
    }
    Ok(out)
}

pub fn load_messages(path: &Path) -> Result<Vec<MessageRecord>, ScenarioError> {
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_messages(&text)
}

/// 装载全部输入并组装仿真世界。返回世界、初始发送端与起始时间。
pub fn build_world(spec: &ScenarioSpec) -> Result<(ArqWorld, NodeId, SimTime), ScenarioError> {
    if spec.inputs.len() != 2 {
        return Err(ScenarioError::BadInputCount(spec.inputs.len()));
    }
    let params = RunParams::from_spec(spec)?;
    let (sender, start) = load_coordinator(&spec.coordinator)?;

    let mut nodes = Vec::with_capacity(2);
    for (i, input) in spec.inputs.iter().enumerate() {
        let messages = load_messages(input)?;
        nodes.push(Endpoint::new(NodeId(i), params.window_size, messages));
    }

    let channel = Channel::new(
        SimTime::from_units_f64(spec.error_delay),
        SimTime::from_units_f64(spec.duplicate_delay),
        spec.loss_probability,
        spec.seed,
    );

    info!(
        sender = sender.0,
        ?start,
        window = params.window_size,
        "场景装载完成"
    );
    Ok((ArqWorld::new(params, channel, nodes), sender, start))
}

/// 在起始时刻向两个端点各调度一条 bootstrap 消息：发送端收到
/// 起始时间文本，另一端收到接收端标记。
pub fn schedule_bootstrap(sim: &mut Simulator, sender: NodeId, start: SimTime) {
    sim.schedule(
        start,
        Bootstrap {
            to: sender,
            payload: start.to_string(),
        },
    );
    sim.schedule(
        start,
        Bootstrap {
            to: sender.peer(),
            payload: RECEIVER_MARKER.to_string(),
        },
    );
}
