use std::sync::Arc;

use teloxide::{prelude::*, utils::command::BotCommands};

use weather_gpt_bot::bot_state::BotState;
use weather_gpt_bot::config::Config;
use weather_gpt_bot::dialogue::{DialogueController, DialogueSettings};
use weather_gpt_bot::handlers::{self, callback_handler, command_handler, message_handler, Command};
use weather_gpt_bot::llm::OpenAiClient;
use weather_gpt_bot::weather::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting weather/GPT bot...");

    // Без ключей бот не запускается
    let config = Config::from_env()?;
    log::info!(
        "⚙️ Routing mode: {:?}, GPT fallback: {:?}, request timeout: {:?}",
        config.routing_mode,
        config.fallback,
        config.request_timeout
    );

    let weather = OpenWeatherClient::new(
        &config.openweather_api_key,
        &config.openweather_base_url,
        config.request_timeout,
    )?;
    let llm = OpenAiClient::new(
        &config.openai_api_key,
        &config.openai_model,
        &config.openai_base_url,
        config.request_timeout,
    )?;

    let state = BotState::new();
    let controller = DialogueController::new(
        state.clone(),
        Arc::new(weather),
        Arc::new(llm),
        DialogueSettings::from(&config),
    );

    // Фоновая задача для очистки простаивающих сессий
    let idle_ttl = config.session_idle_ttl;
    tokio::spawn(async move {
        handlers::cleanup_sessions_task(state, idle_ttl).await;
    });

    let bot = Bot::new(&config.telegram_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![controller])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
