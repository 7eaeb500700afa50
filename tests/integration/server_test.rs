use procintel::core::config::Config;
use procintel::server::Server;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const INVALID_PARAMS: i64 = -32602;

fn initialize() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "integration", "version": "0.0.0" }
        }
    })
}

fn initialized() -> Value {
    json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

/// Pipe `messages` into a fresh server, close its input, and collect every reply
async fn session(messages: Vec<Value>) -> Vec<Value> {
    let (mut client_out, server_in) = tokio::io::duplex(64 * 1024);
    let (server_out, client_in) = tokio::io::duplex(64 * 1024);

    let server = tokio::spawn(Server::new(Config::default()).serve_io(server_in, server_out));

    let mut input = String::new();
    for message in [initialize(), initialized()].into_iter().chain(messages) {
        input.push_str(&message.to_string());
        input.push('\n');
    }
    client_out.write_all(input.as_bytes()).await.unwrap();
    drop(client_out);

    let mut replies = Vec::new();
    let mut lines = BufReader::new(client_in).lines();
    while let Some(line) = lines.next_line().await.unwrap() {
        replies.push(serde_json::from_str(&line).unwrap());
    }

    server.await.unwrap().unwrap();
    replies
}

fn reply(replies: &[Value], id: u64) -> &Value {
    replies
        .iter()
        .find(|reply| reply["id"] == id)
        .unwrap_or_else(|| panic!("no reply for request {}", id))
}

#[tokio::test]
async fn test_call_before_eof_is_answered_once() {
    let replies = session(vec![call(1, "get_memory_usage", json!({}))]).await;

    let answers: Vec<&Value> = replies.iter().filter(|r| r["id"] == 1).collect();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["result"]["isError"], false);
    assert!(answers[0]["result"]["structuredContent"]["RAM"].is_object());
}

#[tokio::test]
async fn test_slow_call_survives_eof() {
    let replies = session(vec![call(1, "get_top_processes", json!({"n": 2, "delay": 0.5}))]).await;

    let result = &reply(&replies, 1)["result"];
    let text = result["content"][0]["text"].as_str().unwrap();
    let top: Vec<Value> = serde_json::from_str(text).unwrap();
    assert!(top.len() <= 2);
}

#[tokio::test]
async fn test_initialize_advertises_tools() {
    let replies = session(Vec::new()).await;

    let result = &reply(&replies, 0)["result"];
    assert_eq!(result["serverInfo"]["name"], "procintel");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list_has_nine_object_schemas() {
    let list = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});
    let replies = session(vec![list]).await;

    let tools = reply(&replies, 1)["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn test_unknown_tool_and_bad_arguments() {
    let replies = session(vec![
        call(1, "kill_process", json!({})),
        call(2, "get_process_tree", json!({"pid": "abc"})),
        call(3, "detect_spikes", json!({"threshold": 101})),
    ])
    .await;

    for id in 1..=3 {
        assert_eq!(reply(&replies, id)["error"]["code"], INVALID_PARAMS);
    }
}

#[tokio::test]
async fn test_missing_process_tree_is_a_result() {
    let replies = session(vec![call(1, "get_process_tree", json!({"pid": u32::MAX}))]).await;

    let response = reply(&replies, 1);
    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"]["structuredContent"]["error"],
        format!("No process with PID {}", u32::MAX)
    );
}

#[tokio::test]
async fn test_spike_call_returns_sentinel() {
    let replies = session(vec![call(1, "detect_spikes", json!({"threshold": 100}))]).await;

    let result = &reply(&replies, 1)["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(
        result["structuredContent"]["warnings"],
        json!(["System usage normal."])
    );
}

#[tokio::test]
async fn test_cancelled_call_does_not_hold_shutdown() {
    let cancel = json!({
        "jsonrpc": "2.0",
        "method": "notifications/cancelled",
        "params": { "requestId": 9 }
    });
    let replies = session(vec![
        call(9, "get_top_processes", json!({"delay": 30})),
        cancel,
        json!({"jsonrpc": "2.0", "id": 10, "method": "ping"}),
    ])
    .await;

    assert!(reply(&replies, 10)["result"].is_object());
    assert!(replies.iter().all(|r| r["result"]["structuredContent"].is_null()));
}
