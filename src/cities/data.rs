use super::catalog::City;

fn city(
    id: &str,
    name: &str,
    country: &str,
    timezone: &str,
    coordinates: [f64; 2],
    description: &str,
    trivia: &[&str],
) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        timezone: timezone.to_string(),
        coordinates,
        description: description.to_string(),
        trivia: trivia.iter().map(|t| t.to_string()).collect(),
    }
}

// Coordinates are [longitude, latitude]
pub fn builtin_cities() -> Vec<City> {
    vec![
        city(
            "tokyo",
            "Tokyo",
            "Japan",
            "Asia/Tokyo",
            [139.6917, 35.6895],
            "Tokyo is Japan's capital and the world's most populous metropolis.",
            &[
                "Tokyo was formerly known as Edo until 1868",
                "The Skytree in Tokyo is the tallest tower in the world",
                "Tokyo has over 200 train stations and the busiest train station in the world",
            ],
        ),
        city(
            "newyork",
            "New York",
            "USA",
            "America/New_York",
            [-74.0060, 40.7128],
            "New York City comprises 5 boroughs sitting where the Hudson River meets the Atlantic Ocean.",
            &[
                "The New York subway system has 472 stations",
                "More than 800 languages are spoken in New York City",
                "Central Park was the first landscaped public park in the United States",
            ],
        ),
        city(
            "london",
            "London",
            "United Kingdom",
            "Europe/London",
            [-0.1276, 51.5072],
            "London is the capital of England and the United Kingdom and one of the world's most diverse cities.",
            &[
                "The London Underground is the oldest underground railway network in the world",
                "Big Ben is actually the name of the bell, not the clock tower",
                "Technically, London is a forest - it has over 8 million trees",
            ],
        ),
        city(
            "sydney",
            "Sydney",
            "Australia",
            "Australia/Sydney",
            [151.2093, -33.8688],
            "Sydney is Australia's largest city and a globally influential center of culture and commerce.",
            &[
                "The Sydney Opera House has over 1 million roof tiles",
                "The Sydney Harbour Bridge is the world's largest steel arch bridge",
                "Sydney has over 100 beaches within the metropolitan area",
            ],
        ),
        city(
            "cairo",
            "Cairo",
            "Egypt",
            "Africa/Cairo",
            [31.2357, 30.0444],
            "Cairo is the capital of Egypt and one of the largest cities in Africa and the Middle East.",
            &[
                "Cairo is known as 'The City of a Thousand Minarets'",
                "The Cairo Metro is the first metro network in Africa",
                "Cairo's Al-Azhar University is one of the oldest universities in the world",
            ],
        ),
        city(
            "rio",
            "Rio de Janeiro",
            "Brazil",
            "America/Sao_Paulo",
            [-43.1729, -22.9068],
            "Rio de Janeiro is a huge seaside city in Brazil, famed for its Copacabana and Ipanema beaches.",
            &[
                "The Christ the Redeemer statue is one of the New Seven Wonders of the World",
                "Rio's Carnival is the biggest carnival in the world",
                "Rio was once the capital of Portugal - the only European capital outside of Europe",
            ],
        ),
    ]
}
