//! Interactive search loop.

use anyhow::Context;
use clima_core::{DisplayMode, WeatherApp};
use inquire::{InquireError, Text};
use std::future::Future;

use crate::render;

pub async fn run(app: &WeatherApp) -> anyhow::Result<()> {
    drive(app, app.startup()).await;

    loop {
        let answer = tokio::task::spawn_blocking(prompt)
            .await
            .context("Input task failed")?;

        match answer {
            Ok(text) => {
                app.set_input(text);
                drive(app, app.submit()).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        }
    }

    Ok(())
}

fn prompt() -> Result<String, InquireError> {
    Text::new("Cidade:")
        .with_placeholder(render::PLACEHOLDER)
        .with_help_message("Enter para buscar, Esc para sair")
        .prompt()
}

/// Runs `work` to completion, showing the loading line while it is in flight,
/// then renders the final state if anything changed.
async fn drive(app: &WeatherApp, work: impl Future<Output = ()>) {
    let before = app.state();
    let mut rx = app.subscribe();
    tokio::pin!(work);

    loop {
        tokio::select! {
            () = &mut work => break,
            Ok(()) = rx.changed() => {
                if rx.borrow_and_update().loading {
                    println!("{}", render::LOADING);
                }
            }
        }
    }

    let after = app.state();
    if after != before || after.mode() == DisplayMode::Initial {
        print!("{}", render::render(&after));
    }
}
