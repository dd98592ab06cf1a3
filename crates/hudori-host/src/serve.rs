//! Line-delimited JSON protocol over stdio.
//!
//! Request:  `{"id": 7, "op": "get_friends", "args": "{\"user_id\":\"u1\"}"}`
//! Reply:    `{"id": 7, "result": {...}}`
//!
//! `args` may also be an inline object. Each request runs in its own task, so replies
//! can come back out of order; `id` is echoed untouched for correlation.

use hudori_bridge::{Bridge, ResultMap, response::failure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Deserialize)]
struct HostRequest {
    #[serde(default)]
    id: Value,
    op: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize)]
struct HostReply {
    id: Value,
    result: Option<ResultMap>,
}

pub async fn run(bridge: Bridge) -> anyhow::Result<()> {
    let (reply_tx, mut reply_rx) = mpsc::channel::<HostReply>(64);

    // Single writer so replies never interleave on stdout
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(reply) = reply_rx.recv().await {
            let mut line = serde_json::to_vec(&reply)?;
            line.push(b'\n');
            stdout.write_all(&line).await?;
            stdout.flush().await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let bridge = bridge.clone();
        let reply_tx = reply_tx.clone();
        tokio::spawn(async move {
            let reply = handle_line(&bridge, &line).await;
            if reply_tx.send(reply).await.is_err() {
                tracing::warn!("reply dropped: writer has stopped");
            }
        });
    }

    // stdin closed: let in-flight requests finish, then stop the writer
    drop(reply_tx);
    writer.await??;
    tracing::info!("stdin closed, host exiting");
    Ok(())
}

async fn handle_line(bridge: &Bridge, line: &str) -> HostReply {
    let request: HostRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("malformed host request: {e}");
            return HostReply { id: Value::Null, result: Some(failure(400, "Invalid request format")) };
        }
    };

    let args = match request.args {
        Value::String(s) => s,
        Value::Null => "{}".to_owned(),
        other => other.to_string(),
    };
    HostReply { id: request.id, result: bridge.invoke(&request.op, &args).await }
}
