//! Instruction text sent with every statement page

/// Fixed extraction prompt. The model is asked for bare JSON; fences and
/// chatter still happen and are dealt with in [`crate::page`].
pub const EXTRACTION_PROMPT: &str = r#"
Extract ALL visible transaction data from this bank statement page. Return ONLY a JSON object with this structure:

{
  "initial_balance": 1000.00,
  "transactions": [
    {
      "date": "YYYY-MM-DD",
      "description": "transaction description",
      "type": "TYPE HERE",
      "amount": -123.45
    }
  ]
}

IMPORTANT INSTRUCTIONS:
- Extract the INITIAL/OPENING balance from the statement (usually shown at the top or beginning)
- If you can't find an explicit initial balance, use the balance from the first transaction
- For transactions, use negative amounts for debits/expenditures, positive for credits/income
- Include the running balance after each transaction if visible
- If you can't read a field clearly, use null
- Return only the JSON object, no other text
- Only give the initial balance from the first page, not subsequent pages
- The initial balance should be the first value in the JSON object, outside the transactions array
- Do not deviate from the structure, do not add extra fields
- ALL CREDITS ARE POSITIVE, ALL DEBITS ARE NEGATIVE

categorization rules:
- food: restaurants, groceries, cafes, food delivery
- shopping: retail stores, online shopping, clothing, electronics
- leisure: entertainment, movies, games, sports, hobbies
- transport: fuel, parking, public transport, ride-sharing, car services
- utilities: electricity, water, gas, internet, phone bills
- healthcare: medical, pharmacy, insurance, dental
- transfer: bank transfers, atm withdrawals, peer-to-peer payments
- unknown: unclear or unidentifiable transactions
"#;
