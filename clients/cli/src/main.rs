use blackjack::strategy::{render_chart, Chart};
use blackjack::{CountTracker, DealerRuleset, PayoutRuleset, RngSource, Shoe, TableRules};
use clap::{Parser, Subcommand};
use juodzekas_trainer::{
    publish_summary, Challenge, ChallengeGoal, GameSession, InMemoryChallenges, InMemoryStats,
    InMemoryWallet, PlayerAction, RoundPhase, SummarySink,
};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use std::io::{self, BufRead, Write};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "juodzekas", about = "Blackjack strategy and card counting trainer")]
struct Cli {
    /// Decks in the shoe
    #[arg(long, env = "TRAINER_DECKS", default_value_t = 6)]
    decks: u8,

    /// conservative, standard or aggressive
    #[arg(long, env = "TRAINER_DEALER_RULESET", default_value = "standard")]
    dealer_ruleset: DealerRuleset,

    /// easy, standard or hard
    #[arg(long, env = "TRAINER_PAYOUT_RULESET", default_value = "standard")]
    payout_ruleset: PayoutRuleset,

    /// Full table rules as JSON; overrides the three flags above
    #[arg(long, env = "TRAINER_RULES_JSON")]
    rules_json: Option<String>,

    /// Seed for a reproducible shoe
    #[arg(long, env = "TRAINER_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds following basic strategy and report the results
    Play {
        #[arg(long, default_value_t = 10)]
        rounds: u32,

        /// Stake per round
        #[arg(long, default_value_t = 10)]
        bet: u64,

        /// Starting coins
        #[arg(long, default_value_t = 1_000)]
        balance: u64,
    },
    /// Running-count drill: guess the Hi-Lo count after each card
    Drill {
        #[arg(long, default_value_t = 20)]
        cards: u32,
    },
    /// Print the basic strategy charts
    Strategy,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BoxErr> {
    let rules = table_rules(&cli)?;
    let rng = make_rng(cli.seed);

    match cli.command {
        Command::Play {
            rounds,
            bet,
            balance,
        } => play(rules, rng, rounds, bet, balance),
        Command::Drill { cards } => drill(rules, rng, cards),
        Command::Strategy => {
            for (title, chart) in [
                ("Hard totals", Chart::Hard),
                ("Soft totals", Chart::Soft),
                ("Pairs", Chart::Pairs),
            ] {
                println!("{title}\n{}", render_chart(chart));
            }
            Ok(())
        }
    }
}

fn table_rules(cli: &Cli) -> Result<TableRules, BoxErr> {
    let rules = match &cli.rules_json {
        Some(json) => TableRules::from_json(json)?,
        None => TableRules::new(cli.decks, cli.dealer_ruleset, cli.payout_ruleset)?,
    };
    Ok(rules)
}

fn make_rng(seed: Option<u64>) -> RngSource<ChaCha8Rng> {
    let rng = match seed {
        Some(seed) => {
            log::info!("Using seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };
    RngSource::new(rng)
}

fn play(
    rules: TableRules,
    rng: RngSource<ChaCha8Rng>,
    rounds: u32,
    bet: u64,
    balance: u64,
) -> Result<(), BoxErr> {
    let mut game = GameSession::new(rules, rng)?;
    let mut wallet = InMemoryWallet::new(balance);
    let mut stats = InMemoryStats::default();
    let mut challenges = InMemoryChallenges::new(vec![
        Challenge::new(ChallengeGoal::HandsWon, 5),
        Challenge::new(ChallengeGoal::Blackjacks, 1),
        Challenge::new(ChallengeGoal::CoinsWon, (bet as i64).saturating_mul(5)),
    ]);

    for round in 1..=rounds {
        if wallet.balance() < bet {
            log::warn!("Balance {} is below the bet of {bet}, stopping", wallet.balance());
            break;
        }

        game.deal_initial_cards(bet)?;
        if let Some(up) = game.dealer_upcard() {
            println!("Round {round}: dealer shows {up}");
        }

        while game.phase() == RoundPhase::Playing {
            let staked: u64 = game.round().hands.iter().map(|h| h.bet).sum();
            let available = wallet.balance().saturating_sub(staked);
            let Some(best) = game.get_optimal_move(available) else {
                break;
            };

            if let Some(player) = game.round().active_hand() {
                let ev = game.expected_value(best).unwrap_or_default();
                print!(
                    "  {} ({}) -> {best} [EV {ev:+.2}, TC {:+.1}]",
                    player.hand.to_display(),
                    player.hand.total(),
                    game.counter().true_count()
                );
                if let Some(index_play) = game.count_deviation() {
                    print!(" (count says {index_play})");
                }
                println!();
            }

            game.execute(PlayerAction::from(best))?;
        }

        let dealer: Vec<String> = game
            .round()
            .dealer_hand
            .iter()
            .map(|c| c.to_display())
            .collect();
        println!("  Dealer: {}", dealer.join(" "));
        for (i, player) in game.round().hands.iter().enumerate() {
            if let Some(result) = player.result {
                println!(
                    "  Hand {}: {} -> {:?} ({:+})",
                    i + 1,
                    player.hand.to_display(),
                    result,
                    player.payout
                );
            }
        }

        if let Some(summary) = game.take_summary() {
            log::debug!("Round summary: {}", serde_json::to_string(&summary)?);
            let sinks: &mut [&mut dyn SummarySink] = &mut [&mut wallet, &mut stats, &mut challenges];
            publish_summary(&summary, sinks);
        }
    }

    println!(
        "\nRounds: {}  Hands won: {}/{} ({:.1}%)  Blackjacks: {}  Net: {:+}  Balance: {}",
        stats.rounds,
        stats.hands_won,
        stats.hands_played,
        stats.win_rate() * 100.0,
        stats.blackjacks,
        stats.net_coins,
        wallet.balance()
    );
    println!(
        "Challenges completed: {}/{}",
        challenges.completed(),
        challenges.challenges().len()
    );
    println!(
        "Running count {}  True count {:+.1}  Shoe {} cards left",
        game.counter().running_count(),
        game.counter().true_count(),
        game.shoe().remaining_cards()
    );
    Ok(())
}

fn drill(rules: TableRules, mut rng: RngSource<ChaCha8Rng>, cards: u32) -> Result<(), BoxErr> {
    let mut shoe = Shoe::new(rules.decks, &mut rng)?;
    let mut tracker = CountTracker::new(rules.decks);
    let total = (cards as usize).min(shoe.remaining_cards());

    println!("Enter the running count after each card (blank to skip, q to stop).");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for i in 1..=total {
        let card = shoe.deal_observed(&mut tracker)?;
        print!("Card {i}/{total}: {card}  count? ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }
        if input.is_empty() {
            continue;
        }
        match input.parse::<i32>() {
            Ok(guess) if tracker.record_guess(guess) => println!("  correct"),
            Ok(_) => println!("  wrong, count is {}", tracker.running_count()),
            Err(_) => println!("  '{input}' is not a number"),
        }
    }

    let stats = tracker.drill_stats();
    println!(
        "\nGuesses {}  Correct {}  Accuracy {:.1}%  Speed {:.2} cards/s",
        stats.guesses, stats.correct, stats.accuracy, stats.cards_per_second
    );
    println!(
        "Running count {}  True count {:+.1}",
        tracker.running_count(),
        tracker.true_count()
    );
    Ok(())
}
