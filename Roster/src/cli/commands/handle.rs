use rostercore::model::ContactId;

pub fn execute(value: &str, decode: bool) -> anyhow::Result<()> {
    if decode {
        let id = ContactId::from_encoded(value)?;
        println!("{}", id.raw());
    } else {
        let raw: u64 = value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid raw handle '{value}': {e}"))?;
        println!("{}", ContactId(raw).encode());
    }
    Ok(())
}
