use std::collections::VecDeque;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rust_sim_chat::chat::{ConversationController, format_timestamp};
use rust_sim_chat::clock::SystemClock;
use rust_sim_chat::common::{ChatCommand, ChatEvent, RemovalReason, TypingState};
use rust_sim_chat::config::{self, AppConfig};
use rust_sim_chat::permission::{PermissionGateway, SimulatedPermissionGateway};
use rust_sim_chat::ui::ChatApp;
use tokio::sync::mpsc;

const HEADLESS_TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(
    name = "rust_sim_chat",
    version,
    about = "Simulated two-party chat with auto-replies and notifications"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Run the engine without a window and log every event
    Headless {
        /// Recipient id (bob, charlie, diana)
        #[arg(long)]
        recipient: Option<String>,
        /// Message to send; repeat to queue several
        #[arg(long = "message", short = 'm')]
        messages: Vec<String>,
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Ask the simulated platform for notification permission
        #[arg(long)]
        request_permission: bool,
    },
    /// Write the default config file and exit
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.mode {
        Some(Mode::InitConfig) => {
            config::save_config(&cli.config, &AppConfig::default())?;
            log::info!("Wrote default config to {}", cli.config);
        }
        Some(Mode::Headless {
            recipient,
            messages,
            seconds,
            request_permission,
        }) => {
            let app_config = config::load_config(&cli.config);
            run_headless(
                app_config,
                recipient,
                messages,
                Duration::from_secs(seconds),
                request_permission,
            )
            .await;
        }
        None => {
            let app_config = config::load_config(&cli.config);
            run_window(app_config)?;
        }
    }

    Ok(())
}

fn run_window(app_config: AppConfig) -> Result<(), eframe::Error> {
    let gateway = Arc::new(SimulatedPermissionGateway::from_config(
        &app_config.permission,
    ));
    let runtime = tokio::runtime::Handle::current();
    let mut controller = Some(ConversationController::with_defaults(
        SystemClock,
        &app_config,
    ));

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Rust Sim Chat",
        options,
        Box::new(move |cc| {
            let controller = controller
                .take()
                .ok_or("ChatApp should only be initialized once")?;

            log::info!(
                "Chat window started for {}",
                controller.current_user().display_name
            );

            Ok(Box::new(ChatApp::new(
                cc,
                controller,
                Arc::clone(&gateway),
                runtime.clone(),
            )))
        }),
    )
}

async fn run_headless(
    app_config: AppConfig,
    recipient: Option<String>,
    messages: Vec<String>,
    run_for: Duration,
    request_permission: bool,
) {
    let mut controller = ConversationController::with_defaults(SystemClock, &app_config);
    let mut events = controller.subscribe();
    let gateway = Arc::new(SimulatedPermissionGateway::from_config(
        &app_config.permission,
    ));
    controller.refresh_permission(gateway.as_ref());

    if let Some(user_id) = recipient {
        controller.dispatch(ChatCommand::SelectRecipient { user_id });
    }
    let mut outbox: VecDeque<String> = messages
        .into_iter()
        .filter(|message| !message.trim().is_empty())
        .collect();
    if !outbox.is_empty() && controller.recipient().is_none() {
        log::warn!("No recipient selected; queued messages will not be sent");
    }

    // Kết quả permission đi từ task nền về vòng lặp chính
    let (permission_tx, mut permission_rx) = mpsc::unbounded_channel();
    if request_permission {
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move {
            let status = gateway.request().await;
            if let Err(err) = permission_tx.send(status) {
                log::warn!("Failed to deliver permission result: {err}");
            }
        });
    }

    let deadline = tokio::time::sleep(run_for);
    tokio::pin!(deadline);
    let mut ticker = tokio::time::interval(HEADLESS_TICK);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = ticker.tick() => {
                controller.tick();
                if controller.recipient().is_some() && !controller.is_sending() {
                    if let Some(content) = outbox.pop_front() {
                        controller.dispatch(ChatCommand::SendMessage { content });
                    }
                }
            }
            Some(status) = permission_rx.recv() => {
                controller.apply_permission_result(status);
            }
            Some(event) = events.recv() => log_event(&event),
        }
    }

    let now = controller.now_ms();
    log::info!("Transcript ({} messages):", controller.messages().len());
    for message in controller.messages() {
        log::info!(
            "  [{}] {}: {}",
            format_timestamp(message.timestamp, now),
            message.sender_name,
            message.content
        );
    }
}

fn log_event(event: &ChatEvent) {
    match event {
        ChatEvent::MessageAppended(message) => {
            log::info!("💬 {}: {}", message.sender_name, message.content)
        }
        ChatEvent::MessagesCleared => log::info!("Messages cleared"),
        ChatEvent::NotificationShown(notification) => log::info!(
            "🔔 [{:?}] {}: {}",
            notification.kind,
            notification.title,
            notification.description
        ),
        ChatEvent::NotificationRemoved { id, reason } => match reason {
            RemovalReason::Expired => log::debug!("{id} expired"),
            RemovalReason::Dismissed => log::debug!("{id} dismissed"),
        },
        ChatEvent::TypingChanged(TypingState::Typing { recipient_id, .. }) => {
            log::info!("⌨ {recipient_id} is typing...")
        }
        ChatEvent::TypingChanged(TypingState::Idle) => log::debug!("Typing stopped"),
        ChatEvent::SendLockChanged(locked) => log::debug!("Send lock held: {locked}"),
        ChatEvent::RecipientChanged(participant) => {
            log::info!("Now chatting with {}", participant.display_name)
        }
        ChatEvent::PermissionChanged(status) => {
            log::info!("Notification permission: {status:?}")
        }
    }
}
