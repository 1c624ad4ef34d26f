//! Interactive session - prompt sequences and the menu loop over the core
//!
//! Everything here is presentation glue: it collects field values from
//! stdin, hands fully-formed requests to the core, and renders what comes
//! back. EOF on stdin cancels the current prompt.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::catalog::{HeaderCatalog, METHODS};
use crate::constants::APP_NAME;
use crate::curl::{parse_curl, to_curl};
use crate::models::Request;
use crate::network::{execute, Outcome, ResponseDetail};
use crate::storage::Store;

pub struct Session {
    store: Store,
    catalog: HeaderCatalog,
    client: reqwest::Client,
}

impl Session {
    pub fn new(store: Store, catalog: HeaderCatalog, client: reqwest::Client) -> Self {
        Session {
            store,
            catalog,
            client,
        }
    }

    /// Single-shot flow: build, preview, optionally execute, optionally save.
    pub async fn run_quick(&mut self) -> Result<()> {
        let Some(request) = self.build_request()? else {
            return Ok(());
        };
        self.preview_and_dispatch(request).await
    }

    /// Menu loop with listing and replay over saved requests.
    pub async fn run_menu(&mut self) -> Result<()> {
        loop {
            println!();
            println!("=== {} ===", APP_NAME);
            println!("1) New request");
            println!("2) List saved requests");
            println!("3) Replay a saved request");
            println!("4) Import from a cURL command");
            println!("0) Quit");
            let Some(choice) = self.prompt("> ")? else {
                break;
            };
            // A failed operation ends that operation, not the session
            let result = match choice.as_str() {
                "1" => match self.build_request()? {
                    Some(request) => self.preview_and_dispatch(request).await,
                    None => Ok(()),
                },
                "2" => {
                    self.list_saved();
                    Ok(())
                }
                "3" => self.replay().await,
                "4" => match self.import_curl()? {
                    Some(request) => self.preview_and_dispatch(request).await,
                    None => Ok(()),
                },
                "0" | "q" => break,
                other => {
                    println!("Unknown choice: {}", other);
                    Ok(())
                }
            };
            if let Err(e) = result {
                println!("Error: {:#}", e);
            }
        }
        Ok(())
    }

    /// Prompt for one line; None means stdin was closed.
    fn prompt(&self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn confirm(&self, label: &str) -> Result<bool> {
        Ok(matches!(
            self.prompt(label)?.as_deref(),
            Some("y") | Some("Y") | Some("yes")
        ))
    }

    fn build_request(&self) -> Result<Option<Request>> {
        let Some(url) = self.prompt("URL: ")? else {
            return Ok(None);
        };
        if url.is_empty() {
            println!("A URL is required.");
            return Ok(None);
        }

        println!("Method:");
        for (i, method) in METHODS.iter().enumerate() {
            println!("  {}) {}", i + 1, method);
        }
        let method = loop {
            let Some(choice) = self.prompt("> ")? else {
                return Ok(None);
            };
            match choice.parse::<usize>() {
                Ok(n) if (1..=METHODS.len()).contains(&n) => break METHODS[n - 1].to_string(),
                _ => println!("Pick 1-{}.", METHODS.len()),
            }
        };

        let mut request = Request::new(url, method)?;
        self.collect_headers(&mut request)?;

        let Some(body) = self.prompt("Body (leave empty for none): ")? else {
            return Ok(None);
        };
        if !body.is_empty() {
            request.body = Some(body);
        }
        Ok(Some(request))
    }

    fn collect_headers(&self, request: &mut Request) -> Result<()> {
        loop {
            println!("Headers:");
            for (i, entry) in self.catalog.entries.iter().enumerate() {
                println!("  {}) {}", i + 1, entry.name);
            }
            println!("  c) Custom header");
            println!("  0) Done");
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            let (name, suggested): (String, &[&str]) = if choice == "0" || choice.is_empty() {
                return Ok(());
            } else if choice == "c" {
                let Some(name) = self.prompt("Header name: ")? else {
                    return Ok(());
                };
                if name.is_empty() {
                    continue;
                }
                (name, &[])
            } else {
                match choice.parse::<usize>() {
                    Ok(n) if (1..=self.catalog.entries.len()).contains(&n) => {
                        let entry = &self.catalog.entries[n - 1];
                        (entry.name.to_string(), entry.values)
                    }
                    _ => {
                        println!("Unknown choice: {}", choice);
                        continue;
                    }
                }
            };

            let Some(value) = self.pick_value(&name, suggested)? else {
                return Ok(());
            };
            request.headers.insert(name, value);
        }
    }

    fn pick_value(&self, name: &str, suggested: &[&str]) -> Result<Option<String>> {
        if suggested.is_empty() {
            return self.prompt(&format!("Value for {}: ", name));
        }
        println!("Common values for {}:", name);
        for (i, value) in suggested.iter().enumerate() {
            println!("  {}) {}", i + 1, value);
        }
        println!("  c) Other value");
        loop {
            let Some(choice) = self.prompt("> ")? else {
                return Ok(None);
            };
            if choice == "c" {
                return self.prompt(&format!("Value for {}: ", name));
            }
            match choice.parse::<usize>() {
                Ok(n) if (1..=suggested.len()).contains(&n) => {
                    return Ok(Some(suggested[n - 1].to_string()))
                }
                _ => println!("Pick 1-{} or c.", suggested.len()),
            }
        }
    }

    async fn preview_and_dispatch(&mut self, request: Request) -> Result<()> {
        show_curl(&request);

        if self.confirm("Execute the request? [y/N] ")? {
            let outcome = execute(&self.client, &request).await;
            render_outcome(&outcome);
        }

        if self.confirm("Save the request? [y/N] ")? {
            let Some(name) = self.prompt("Request name: ")? else {
                return Ok(());
            };
            let mut request = request;
            request.name = name;
            let saved = self.store.append(request)?;
            println!("Request '{}' saved.", saved.name);
        }
        Ok(())
    }

    fn list_saved(&self) {
        if self.store.is_empty() {
            println!("No saved requests.");
            return;
        }
        for (i, request) in self.store.list().iter().enumerate() {
            let when = request
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            println!(
                "{:>3}) {:<20} {:<6} {}  ({})",
                i + 1,
                request.name,
                request.method,
                request.url,
                when
            );
        }
    }

    async fn replay(&mut self) -> Result<()> {
        if self.store.is_empty() {
            println!("No saved requests.");
            return Ok(());
        }
        self.list_saved();
        let Some(choice) = self.prompt("Replay which request? (0 to cancel) ")? else {
            return Ok(());
        };
        let Ok(position) = choice.parse::<usize>() else {
            println!("Not a number: {}", choice);
            return Ok(());
        };
        if position == 0 {
            return Ok(());
        }
        let Some(saved) = self.store.get(position) else {
            println!("No request at position {}.", position);
            return Ok(());
        };

        let request = saved.transient_copy();
        show_curl(&request);
        let outcome = execute(&self.client, &request).await;
        render_outcome(&outcome);
        Ok(())
    }

    fn import_curl(&self) -> Result<Option<Request>> {
        let Some(input) = self.prompt("Paste a cURL command: ")? else {
            return Ok(None);
        };
        match parse_curl(&input) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                println!("Could not parse that: {}", e);
                Ok(None)
            }
        }
    }
}

fn show_curl(request: &Request) {
    println!();
    println!("=== Generated cURL command ===");
    println!("{}", to_curl(request));
}

fn render_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Success(detail) => {
            println!();
            println!("=== Response ===");
            render_detail(detail);
        }
        Outcome::Failure { message, response } => {
            println!();
            println!("Request failed: {}", message);
            if let Some(detail) = response {
                println!("=== Server response ===");
                render_detail(detail);
            }
        }
    }
}

fn render_detail(detail: &ResponseDetail) {
    println!(
        "Status: {} {} ({} ms)",
        detail.status, detail.status_text, detail.time_ms
    );
    for (name, value) in &detail.headers {
        println!("{}: {}", name, value);
    }
    if !detail.body.is_empty() {
        println!();
        println!("{}", detail.body);
    }
}
