//! Local chat room demo.
//!
//! Spawns a session with two users and per-client executors backed by a
//! scripted assist handler, exchanges a few posts, and prints the shared
//! transcript. Point `HttpAssistHandler` at a real endpoint instead of the
//! scripted handler to chat with an actual AI worker.
//!
//! Run with `RUST_LOG=debug cargo run --example chat_room` to watch the
//! election and routing decisions.

use parley_chat::{random_name, ChatInput, ChatModel};
use parley_executor::spawn_executor;
use parley_session::Session;
use parley_testkit::{wait_until, ScriptedAssist};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> parley_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let session = Session::spawn(ChatModel::new());
    let assist = ScriptedAssist::new([
        "Happy to help! What are you two cooking?",
        "A soufflé rises on whipped egg whites - fold them in gently.",
    ]);

    let alice = session.join(random_name())?;
    let bob = session.join(random_name())?;
    let alice_client = alice.clone();
    let bob_client = bob.clone();

    // Every client runs an executor; only the elected one will answer
    spawn_executor(alice, assist.clone());
    spawn_executor(bob, assist.clone());

    alice_client.publish_input(ChatInput::Post {
        view: alice_client.view_id(),
        text: "hello ai, we need cooking advice".to_string(),
    })?;
    bob_client.publish_input(ChatInput::Post {
        view: bob_client.view_id(),
        text: "how do I keep a soufflé from collapsing?".to_string(),
    })?;

    wait_until(&session, |model: &ChatModel| model.awaiting_len() == 0).await?;

    let transcript = session.inspect(|model: &ChatModel| model.history().to_vec()).await?;
    println!("--- transcript ---");
    for line in transcript {
        println!("{line}");
    }

    Ok(())
}
