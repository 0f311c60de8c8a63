//! Fixed batch of unlabeled comments classified at the end of every
//! experiment run.

/// Example comments ranging from plain opinions to money-making and
/// link-bait spam.
pub const SAMPLE_COMMENTS: &[&str] = &[
    "I believe that soccer promotes terrorism.",
    "win money at hopme",
    "New way to make money easily",
    "You acquire the bonus as income",
    "download some other free apps and you get money",
    "You can make money online and start working from home today",
    "Work from the Comfort of your Home",
    "I Found a Way to Make Money Online",
    "this song is racist",
    "WAYS TO MAKE MONEY 50k Per Month Search google Now &gt;&gt; 9nl.me/make-money-without-investment-1",
    "wanna earn money online without investment.....just visit this link",
    "Earn money for being online with 0 efforts!",
    "O peoples of the earth, I have seen how you perform every form of evil at your leisure! You cease not from reveling in that which I hate! Behold, you murder the innocent day and night and plot evil against your neighbor! You stand up for the rights of those who commit abomination and clap your hands as wickedness is celebrated openly in the streets!... O MOST PERVERSE AND ABOMINABLE GENERATION, SHALL I NOT REPAY?!  Hear the Word of The Lord - TrumpetCallOfGodOnline.  co m",
    "Recommend:  Apple iPad 4th Gen 32GB Unlocked Wi-Fi+4G 9.7in White Price:$390  Apple iPhone 5 (Latest Model) - 32GB - Black Price:$385  Samsung Galaxy S4 S IV 4 with 16GB New White Price:$360  Sony 60-inch 3D LED HDTV Price:$510  All-in-One PCs: Apple MacBook Pro: Apple MacBook Air Price:$320  Camera :Nikon D90 SLR Camera /18-55mm /55-200mm 32GB  Price:$390   Ultrabooks: SONY VAIO Pro 13 Intel Core i5 4GB 128GB Price:$515  +++++++++++++++    Purchase online Website is:  Taaee.com",
    "Message :   GTA V  $20  FIFA 14 $15  PS4  $200  Galaxy S4 mini $250  Ipad 4   $200  visit the site hh.nl",
    "Meet The Richest Online Marketer  NOW CLICK : bit.ly/make-money-without-adroid",
    "Hey, I am doing the Forty Hour famine so I&#39;ll be giving up on food and social working for 40 hours. I&#39;m doing this to raise money for African people who can&#39;t experience the luxuries that we can. So can you donate to give them a chance?  Any amount would do :)  Click on the link and donate h t t p : / / 4 0 h f . c o m . a u / A n t h o n y L a m Thanks :)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_batch_size() {
        assert_eq!(SAMPLE_COMMENTS.len(), 17);
        assert!(SAMPLE_COMMENTS.iter().all(|c| !c.trim().is_empty()));
    }

    #[test]
    fn test_long_comments_are_kept_whole() {
        let price_list = SAMPLE_COMMENTS
            .iter()
            .find(|c| c.starts_with("Recommend:"))
            .expect("price-list comment");
        assert_eq!(
            *price_list,
            "Recommend:  Apple iPad 4th Gen 32GB Unlocked Wi-Fi+4G 9.7in White Price:$390  \
             Apple iPhone 5 (Latest Model) - 32GB - Black Price:$385  \
             Samsung Galaxy S4 S IV 4 with 16GB New White Price:$360  \
             Sony 60-inch 3D LED HDTV Price:$510  \
             All-in-One PCs: Apple MacBook Pro: Apple MacBook Air Price:$320  \
             Camera :Nikon D90 SLR Camera /18-55mm /55-200mm 32GB  Price:$390   \
             Ultrabooks: SONY VAIO Pro 13 Intel Core i5 4GB 128GB Price:$515  \
             +++++++++++++++    Purchase online Website is:  Taaee.com"
        );

        let sermon = SAMPLE_COMMENTS
            .iter()
            .find(|c| c.starts_with("O peoples"))
            .expect("sermon comment");
        assert!(sermon.contains("SHALL I NOT REPAY?!"));
        assert!(sermon.ends_with("TrumpetCallOfGodOnline.  co m"));
    }
}
