pub fn main() -> evelink::Result<()> {
    env_logger::init();

    let key_id = std::env::var("EVE_KEY_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or_default();
    let vcode = std::env::var("EVE_VCODE").unwrap_or_default();

    let api = evelink::ApiConfig::from_key(key_id, vcode).to_api()?;
    let corp = evelink::Corp::new(api);

    for (key, wallet) in corp.wallet_info()? {
        println!("Wallet {}: {:.2} ISK", key, wallet.balance);
    }

    for (id, starbase) in corp.starbases()? {
        let details = corp.starbase_details(id)?;
        println!(
            "Starbase {} is {}; fuel bay taken by {}",
            id, starbase.state, details.permissions.fuel.take
        );
    }

    match corp.faction_warfare_stats() {
        Ok(stats) => println!("Enlisted with {}", stats.faction.name),
        // The API reports an error for corporations outside faction warfare.
        Err(evelink::Error::Api { message, .. }) => println!("Not enlisted: {}", message),
        Err(err) => return Err(err),
    }

    Ok(())
}
