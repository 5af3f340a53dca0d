use std::io::{self, BufRead, Write};

use crate::bucket::{validate_drop_zone_name, BucketClient, DropZoneCreation, DEFAULT_REGION};
use crate::cli::SetupArgs;
use crate::report;
use crate::types::{AppError, Environment};

const COMMON_REGIONS: &[(&str, &str)] = &[
    ("us-east-1", "N. Virginia"),
    ("us-west-2", "Oregon"),
    ("eu-west-1", "Ireland"),
    ("ap-southeast-1", "Singapore"),
    ("ap-southeast-2", "Sydney"),
];

pub(super) async fn run(
    args: &SetupArgs,
    profile: Option<&str>,
    environment: &Environment,
) -> Result<(), AppError> {
    println!("{}", report::BANNER);
    println!("{}", "=".repeat(60));

    let (name, region) = read_answers(args, &mut io::stdin().lock(), &mut io::stdout())?;

    println!("\n🪣 Creating drop zone: {name}");
    println!("📍 Region: {region}");

    let sdk_config = environment.aws_config(profile).await;
    match BucketClient::provision(&sdk_config, environment, &name, &region).await? {
        DropZoneCreation::Created => {
            println!("🔒 Public access blocked");
            println!("📝 File versioning enabled");
            println!("✅ Drop zone '{name}' created successfully!");
        }
        DropZoneCreation::AlreadyOwned => {
            println!("ℹ️ Drop zone '{name}' already exists and is owned by you");
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("🎉 Setup complete! Your secure drop zone is ready.\n");
    print!("{}", report::quick_start(&name));

    Ok(())
}

/// Drop zone name and region, prompting for whichever `args` leaves out
fn read_answers<R, W>(
    args: &SetupArgs,
    input: &mut R,
    output: &mut W,
) -> Result<(String, String), AppError>
where
    R: BufRead,
    W: Write,
{
    let name = match &args.name {
        Some(name) => name.trim().to_string(),
        None => {
            writeln!(output, "Let's create your secure file drop zone!\n")?;
            prompt_or(input, output, "Enter a unique drop zone name: ", "")?
        }
    };
    validate_drop_zone_name(&name)?;

    let region = match &args.region {
        Some(region) => region.trim().to_string(),
        None => {
            writeln!(output, "\nCommon AWS regions:")?;
            for (region, place) in COMMON_REGIONS {
                writeln!(output, "  {region:<15}({place})")?;
            }
            prompt_or(
                input,
                output,
                &format!("\nEnter AWS region (press Enter for {DEFAULT_REGION}): "),
                DEFAULT_REGION,
            )?
        }
    };

    Ok((name, region))
}

/// Prints `prompt` and reads one trimmed line, using `default` for an empty answer
fn prompt_or<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: &str,
) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}
