/// Companies offered in the ticker picker, in display order.
pub const SP500_COMPANIES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("JPM", "JPMorgan Chase & Co."),
    ("JNJ", "Johnson & Johnson"),
    ("V", "Visa Inc."),
    ("PG", "Procter & Gamble Company"),
    ("UNH", "UnitedHealth Group Inc."),
    ("HD", "Home Depot Inc."),
    ("MA", "Mastercard Inc."),
    ("BAC", "Bank of America Corp."),
    ("XOM", "Exxon Mobil Corporation"),
    ("DIS", "Walt Disney Company"),
    ("ADBE", "Adobe Inc."),
    ("NFLX", "Netflix Inc."),
    ("KO", "Coca-Cola Company"),
    ("PFE", "Pfizer Inc."),
    ("INTC", "Intel Corporation"),
    ("CRM", "Salesforce Inc."),
    ("CSCO", "Cisco Systems Inc."),
    ("WMT", "Walmart Inc."),
    ("ABT", "Abbott Laboratories"),
    ("TMO", "Thermo Fisher Scientific Inc."),
    ("COST", "Costco Wholesale Corporation"),
    ("AVGO", "Broadcom Inc."),
    ("ACN", "Accenture plc"),
    ("PEP", "PepsiCo Inc."),
    ("AMD", "Advanced Micro Devices Inc."),
    ("GS", "The Goldman Sachs Group, Inc."),
    ("VZ", "Verizon Communications, Inc."),
    ("QCOM", "Qualcomm, Inc."),
    ("BLK", "BlackRock, Inc."),
    ("C", "Citigroup Inc."),
    ("HOOD", "Robinhood Markets, Inc."),
    ("QBTS", "D-Wave Quantum Inc."),
    ("ASML", "ASML Holding N.V."),
    ("RGTI", "Rigetti Computing, Inc."),
];

pub fn display_name(ticker: &str) -> Option<&'static str> {
    SP500_COMPANIES
        .iter()
        .find(|(symbol, _)| symbol.eq_ignore_ascii_case(ticker))
        .map(|(_, name)| *name)
}

pub fn position(ticker: &str) -> Option<usize> {
    SP500_COMPANIES
        .iter()
        .position(|(symbol, _)| symbol.eq_ignore_ascii_case(ticker))
}

pub fn contains(ticker: &str) -> bool {
    position(ticker).is_some()
}
