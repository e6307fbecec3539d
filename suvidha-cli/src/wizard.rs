//! Interactive kiosk wizard over stdin/stdout. Each screen renders its
//! localized prompts, and `s` reads the screen aloud the way the on-screen
//! speaker icon does.

use comfy_table::Table;
use console::style;
use std::io::{self, Write};
use suvidha_api::{Complaint, ComplaintApi};
use suvidha_core::i18n::{self, key};
use suvidha_core::{Department, FormInput, Language, Screen, ServiceKind};
use suvidha_kiosk::{KioskApp, KioskError};

pub async fn run<A: ComplaintApi>(mut app: KioskApp<A>) -> anyhow::Result<()> {
    loop {
        match app.screen() {
            Screen::Welcome => {
                if !welcome(&mut app)? {
                    return Ok(());
                }
            }
            Screen::Language => language(&mut app)?,
            Screen::Department => department(&mut app)?,
            Screen::Service => service(&mut app)?,
            Screen::Form => form(&mut app)?,
            Screen::Confirm => confirm(&mut app).await?,
            Screen::Receipt => receipt(&mut app)?,
            Screen::Track => track(&mut app).await?,
        }
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt} ");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Index of a 1-based menu choice, if `input` is one.
fn pick(input: &str, len: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|i| (1..=len).contains(i))
        .map(|i| i - 1)
}

fn speak_now<A: ComplaintApi>(app: &KioskApp<A>) {
    if let Err(e) = app.speak_screen() {
        tracing::debug!("speech failed: {e}");
        let message = i18n::text(app.language(), key::SPEECH_UNAVAILABLE);
        println!("{}", style(message).red());
    }
}

fn welcome<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<bool> {
    let t = |k| i18n::text(app.language(), k);
    println!();
    println!("{}", style("SUVIDHA").cyan().bold());
    println!("{}", style(t(key::WELCOME_SUBTITLE)).dim());
    let input = read_line(&format!("[Enter] {}  [s] speak  [q] quit >", t(key::START)))?;
    match input.as_str() {
        "q" => return Ok(false),
        "s" => speak_now(app),
        _ => app.flow_mut().start()?,
    }
    Ok(true)
}

fn language<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let t = |k| i18n::text(app.language(), k);
    println!("\n{}", style(t(key::SELECT_LANGUAGE)).bold());
    for (i, lang) in Language::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, lang.native_name());
    }
    let input = read_line(&format!("1-7  [b] {}  [s] speak >", t(key::BACK)))?;
    match input.as_str() {
        "b" => app.flow_mut().back()?,
        "s" => speak_now(app),
        other => {
            if let Some(i) = pick(other, Language::ALL.len()) {
                app.flow_mut().choose_language(Language::ALL[i])?;
            }
        }
    }
    Ok(())
}

fn department<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    println!("\n{}", style(t(key::SELECT_DEPARTMENT)).bold());
    for (i, dept) in Department::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, t(dept.message_key()));
    }
    let input = read_line(&format!("1-4  [b] {}  [s] speak >", t(key::BACK)))?;
    match input.as_str() {
        "b" => app.flow_mut().back()?,
        "s" => speak_now(app),
        other => {
            if let Some(i) = pick(other, Department::ALL.len()) {
                app.flow_mut().choose_department(Department::ALL[i])?;
            }
        }
    }
    Ok(())
}

fn service<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    println!("\n{}", style(t(key::SELECT_SERVICE)).bold());
    for (i, service) in ServiceKind::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, t(service.message_key()));
    }
    let input = read_line(&format!("1-3  [b] {}  [s] speak >", t(key::BACK)))?;
    match input.as_str() {
        "b" => app.flow_mut().back()?,
        "s" => speak_now(app),
        other => {
            if let Some(i) = pick(other, ServiceKind::ALL.len()) {
                app.flow_mut().choose_service(ServiceKind::ALL[i])?;
            }
        }
    }
    Ok(())
}

fn form<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    println!("\n{}", style(t(key::FILL_FORM)).bold());
    println!("{}", style(format!("[b] {}  [s] speak", t(key::BACK))).dim());

    let name = read_line(&format!("{}:", t(key::NAME)))?;
    if name == "b" {
        app.flow_mut().back()?;
        return Ok(());
    }
    if name == "s" {
        speak_now(app);
        return Ok(());
    }
    let mobile = read_line(&format!("{}:", t(key::MOBILE)))?;
    let problem = read_line(&format!("{}:", t(key::PROBLEM)))?;
    let file_name = read_line("Upload proof / photo / document file name (optional):")?;

    let input = FormInput {
        name,
        mobile,
        problem,
        file_name: (!file_name.is_empty()).then_some(file_name),
    };
    if let Err(e) = app.flow_mut().submit_form(&input) {
        println!("{}", style(KioskError::from(e).user_message(lang)).red());
    }
    Ok(())
}

async fn confirm<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    println!("\n{}", style(t(key::CONFIRM)).bold());
    println!("{}", t(key::REVIEW_DETAILS));

    let session = app.flow().session();
    let mut table = Table::new();
    table.add_row([
        t(key::DEPARTMENT),
        session.department.map(|d| t(d.message_key())).unwrap_or(""),
    ]);
    table.add_row([
        t(key::SERVICE),
        session.service.map(|s| t(s.message_key())).unwrap_or(""),
    ]);
    table.add_row([t(key::NAME), session.name.as_str()]);
    table.add_row([t(key::MOBILE), session.mobile.as_str()]);
    table.add_row([t(key::PROBLEM), session.problem.as_str()]);
    println!("{table}");

    let input = read_line(&format!(
        "[y] {}  [b] {}  [s] speak >",
        t(key::SUBMIT),
        t(key::BACK)
    ))?;
    match input.as_str() {
        "b" => app.flow_mut().back()?,
        "s" => speak_now(app),
        "y" => {
            println!("{}", style(t(key::SUBMITTING)).dim());
            if let Err(e) = app.submit().await {
                println!("{}", style(e.user_message(lang)).red());
            }
        }
        _ => {}
    }
    Ok(())
}

fn receipt<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    let token = app.flow().token().map(|tok| tok.to_string()).unwrap_or_default();
    println!("\n{}", style(format!("✓ {}", t(key::RECEIPT))).green().bold());
    println!("{}: {}", t(key::TOKEN_NUMBER), style(&token).bold());
    println!("{}", t(key::REGISTERED_SUCCESSFULLY));
    println!("{} {}", t(key::SMS_SENT_TO), app.flow().session().mobile);
    println!("{}", t(key::THANK_YOU));
    println!("{}", t(key::KEEP_TOKEN));
    let input = read_line(&format!("[Enter] {}  [s] speak >", t(key::HOME)))?;
    if input == "s" {
        speak_now(app);
    } else {
        app.flow_mut().go_home()?;
    }
    Ok(())
}

async fn track<A: ComplaintApi>(app: &mut KioskApp<A>) -> anyhow::Result<()> {
    let lang = app.language();
    let t = |k| i18n::text(lang, k);
    println!("\n{}", style(t(key::TRACK_STATUS)).bold());
    println!("{}", t(key::ENTER_TOKEN_TO_TRACK));
    let input = read_line(&format!("{}  [b] {}  [s] speak >", t(key::TOKEN_NUMBER), t(key::BACK)))?;
    match input.as_str() {
        "b" => app.flow_mut().back()?,
        "s" => speak_now(app),
        token_input => {
            println!("{}", style(t(key::CHECKING)).dim());
            match app.track(token_input).await {
                Ok(complaint) => print_complaint(lang, &complaint),
                Err(e) => println!("{}", style(e.user_message(lang)).red()),
            }
        }
    }
    Ok(())
}

pub(crate) fn print_complaint(lang: Language, complaint: &Complaint) {
    let t = |k| i18n::text(lang, k);
    println!("{}", style(t(key::COMPLAINT_DETAILS)).bold());
    let mut table = Table::new();
    table.add_row([t(key::TOKEN_NUMBER).to_string(), format!("#{}", complaint.id)]);
    table.add_row([t(key::STATUS).to_string(), complaint.status.to_string()]);
    table.add_row([t(key::DEPARTMENT).to_string(), complaint.issue_type.clone()]);
    table.add_row([t(key::DESCRIPTION).to_string(), complaint.description.clone()]);
    table.add_row([
        t(key::LOCATION).to_string(),
        complaint
            .location
            .clone()
            .unwrap_or_else(|| t(key::NOT_PROVIDED).to_string()),
    ]);
    table.add_row([t(key::SUBMITTED_ON).to_string(), complaint.created_at.to_rfc3339()]);
    println!("{table}");
}
