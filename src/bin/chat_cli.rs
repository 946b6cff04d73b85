use std::env;
use std::io::{self, BufRead, Write};

use dotenv::dotenv;

use chat_relay::client::{ChatClient, ChatSession};
use chat_relay::web::models::Role;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let base_url =
        env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    println!("Chatting via {} (/clear resets, /quit exits)", base_url);

    let client = ChatClient::new(base_url);
    let mut session = ChatSession::new();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "/quit" => break,
            "/clear" => {
                session.clear();
                println!("(cleared)");
            }
            input => {
                let before = session.all().len();
                client.send_message(&mut session, input).await;
                for message in &session.all()[before..] {
                    if message.role == Role::Assistant {
                        println!("{}", message.text);
                    }
                }
            }
        }
    }

    Ok(())
}
