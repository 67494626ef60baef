//! Session commands.

use std::io::{BufRead, Write};

use kiosk_core::Credentials;
use kiosk_storefront::session::LoginEntry;
use kiosk_storefront::{Result, Storefront};

/// Sign in, prompting for the password when it was not passed as a flag.
pub async fn login(
    app: &mut Storefront,
    username: String,
    password: Option<String>,
    admin: bool,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password(),
    };

    let entry = if admin {
        LoginEntry::Admin
    } else {
        LoginEntry::Storefront
    };

    let user = app.login(&Credentials { username, password }, entry).await?;
    if user.is_admin {
        println!("Signed in as {} (admin)", user.username);
    } else {
        println!("Signed in as {}", user.username);
    }
    Ok(())
}

pub fn logout(app: &mut Storefront) {
    app.logout();
    println!("Signed out; guest cart restored");
}

pub fn whoami(app: &Storefront) {
    match app.session().user() {
        Some(user) if user.is_admin => println!("{} (admin)", user.username),
        Some(user) => println!("{}", user.username),
        None => println!("guest"),
    }
}

fn prompt_password() -> String {
    print!("Password: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
    line.trim_end_matches(['\r', '\n']).to_owned()
}
