use std::io::BufRead;

use mealweek::Config;

fn read_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

pub fn login(config: Config, password: Option<String>) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;
    if !planner.is_gated() {
        println!("No password configured, login is not required");
        return Ok(());
    }

    let password = read_password(password)?;

    let expiry = planner.login(&password)?;
    println!("Logged in until {}", expiry.date());

    Ok(())
}

pub fn logout(config: Config) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;
    let Some(expiry) = planner.session_expiry()? else {
        println!("Not logged in");
        return Ok(());
    };

    planner.logout()?;
    println!("Logged out, session was valid until {}", expiry.date());

    Ok(())
}

pub fn hash_password(password: Option<String>) -> anyhow::Result<()> {
    let password = read_password(password)?;
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    println!("{}", mealweek_store::hash_password(&password)?);

    Ok(())
}
